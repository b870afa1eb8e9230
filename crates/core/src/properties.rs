use std::collections::BTreeMap;

use crate::Answers;

/// Key/value pairs written to a platform's properties file.
pub type Properties = BTreeMap<String, String>;

/// Turns answers into the monitoring CLI's properties and serializes them.
///
/// The orchestrator treats the dumped text as opaque bytes.
pub trait PropertiesProvider: Send + Sync {
    fn convert_answers(&self, answers: &Answers) -> Properties;
    fn dump_properties(&self, properties: &Properties) -> String;
}
