use serde_json::Value;

/// Extra fields attached to a record, JSON-shaped.
pub type Properties = serde_json::Map<String, Value>;

/// Field access the matcher needs from a searchable item.
///
/// Implement this on your entity and event types to run queries on them.
/// A record without one of the core fields should return `""` for it.
pub trait Record {
    fn name(&self) -> &str;

    /// Stable identifier, searched like any other field.
    fn key(&self) -> &str;

    fn summary(&self) -> &str;

    /// The record's type label, e.g. `"transaction"` or `"person"`.
    fn kind(&self) -> &str;

    /// Extra fields, searched only under [`MatchOptions::all_fields`].
    fn properties(&self) -> Option<&Properties> {
        None
    }
}

/// Knobs for the built-in record matcher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Search the values of [`Record::properties`] on top of the four core
    /// fields.
    pub all_fields: bool,
}

impl MatchOptions {
    pub fn new() -> MatchOptions {
        MatchOptions::default()
    }

    pub fn with_all_fields(mut self, all_fields: bool) -> Self {
        self.all_fields = all_fields;
        self
    }
}

/// Builds the lower-cased haystack the built-in predicate searches.
///
/// The four core fields are always in, space-joined in a fixed order. With
/// `all_fields`, every non-null property value follows: strings verbatim,
/// anything else through its JSON text.
pub fn searchable_text(record: &impl Record, options: &MatchOptions) -> String {
    let mut text = [record.name(), record.key(), record.summary(), record.kind()].join(" ");
    if options.all_fields {
        if let Some(properties) = record.properties() {
            for value in properties.values() {
                match value {
                    Value::Null => (),
                    Value::String(s) => {
                        text.push(' ');
                        text.push_str(s);
                    }
                    value => {
                        text.push(' ');
                        text.push_str(&value.to_string());
                    }
                }
            }
        }
    }
    text.to_lowercase()
}

fn json_str<'a>(value: Option<&'a Value>) -> &'a str {
    value.and_then(Value::as_str).unwrap_or("")
}

/// JSON objects are searchable as they are: the core fields are read from
/// like-named keys (`"type"` for [`Record::kind`]) when they hold strings,
/// and the whole object doubles as the property map.
impl Record for Properties {
    fn name(&self) -> &str {
        json_str(self.get("name"))
    }

    fn key(&self) -> &str {
        json_str(self.get("key"))
    }

    fn summary(&self) -> &str {
        json_str(self.get("summary"))
    }

    fn kind(&self) -> &str {
        json_str(self.get("type"))
    }

    fn properties(&self) -> Option<&Properties> {
        Some(self)
    }
}

/// Same for a raw [`Value`]: non-objects have no fields and match only
/// empty-text queries.
impl Record for Value {
    fn name(&self) -> &str {
        json_str(self.get("name"))
    }

    fn key(&self) -> &str {
        json_str(self.get("key"))
    }

    fn summary(&self) -> &str {
        json_str(self.get("summary"))
    }

    fn kind(&self) -> &str {
        json_str(self.get("type"))
    }

    fn properties(&self) -> Option<&Properties> {
        self.as_object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Event {
        name: String,
        summary: String,
    }

    impl Record for Event {
        fn name(&self) -> &str {
            &self.name
        }
        fn key(&self) -> &str {
            ""
        }
        fn summary(&self) -> &str {
            &self.summary
        }
        fn kind(&self) -> &str {
            "event"
        }
    }

    #[test]
    fn text_assembly() {
        let event = Event {
            name: "Account Opening".to_string(),
            summary: "Opened by Dana".to_string(),
        };
        assert_eq!(
            searchable_text(&event, &MatchOptions::default()),
            "account opening  opened by dana event"
        );
        // No properties: all_fields changes nothing
        assert_eq!(
            searchable_text(&event, &MatchOptions::new().with_all_fields(true)),
            "account opening  opened by dana event"
        );
    }

    #[test]
    fn json_records() {
        let record = json!({
            "name": "Wire transfer",
            "key": "txn-0042",
            "summary": "Flagged",
            "type": "transaction",
            "amount": 12500,
            "memo": null,
        });
        assert_eq!(record.name(), "Wire transfer");
        assert_eq!(record.kind(), "transaction");
        assert_eq!(
            searchable_text(&record, &MatchOptions::default()),
            "wire transfer txn-0042 flagged transaction"
        );
        let text = searchable_text(&record, &MatchOptions::new().with_all_fields(true));
        assert!(text.contains("12500"));
        assert!(!text.contains("null"));

        // Missing fields read as empty
        let bare = json!({ "name": "Dana" });
        assert_eq!(bare.key(), "");
        assert_eq!(searchable_text(&bare, &MatchOptions::default()), "dana   ");

        // Non-objects have nothing to search
        let scalar = json!(42);
        assert_eq!(scalar.name(), "");
        assert!(scalar.properties().is_none());
    }

    #[test]
    fn options_builder() {
        assert!(!MatchOptions::default().all_fields);
        assert!(MatchOptions::new().with_all_fields(true).all_fields);
    }
}
