use config::{ConfigError, Map, Source, Value, ValueKind};
use std::env;

const ENV_PREFIX: &str = "passgate--";
const ENV_SEPARATOR: &str = "--";

/// Convert one `--`-separated segment of an environment key into a camel case
/// configuration key. `SOME_KEY` becomes `someKey`.
fn convert_key_case(segment: &str) -> String {
    let mut converted = String::with_capacity(segment.len());
    for (i, word) in segment.split('_').enumerate() {
        if i == 0 {
            converted.push_str(&word.to_lowercase());
        } else {
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                converted.extend(first.to_uppercase());
                converted.push_str(&chars.as_str().to_lowercase());
            }
        }
    }
    converted
}

/// Configuration source reading `PASSGATE--SECTION--SOME_KEY` environment variables
/// as the `section.someKey` configuration path.
#[derive(Debug, Clone, Default)]
pub struct Environment;

impl Environment {
    pub fn new() -> Self {
        Self
    }
}

impl Source for Environment {
    fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
        Box::new(self.clone())
    }

    fn collect(&self) -> Result<Map<String, Value>, ConfigError> {
        let uri: String = "environment".into();

        let mut values = Map::new();
        for (env_key, value) in env::vars() {
            let env_key_lower = env_key.to_lowercase();
            let key = match env_key_lower.strip_prefix(ENV_PREFIX) {
                Some(key) => key,
                None => continue,
            };
            let key = key
                .split(ENV_SEPARATOR)
                .map(convert_key_case)
                .collect::<Vec<_>>()
                .join(".");
            log::debug!("Reading env {} as {}...", env_key, key);

            values.insert(key, Value::new(Some(&uri), ValueKind::String(value)));
        }

        log::trace!("Environment: {:#?}", values);
        Ok(values)
    }
}
