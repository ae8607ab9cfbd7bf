//! YAML rendering for CLI output.

use anyhow::{Context, Result};
use serde::Serialize;
use yaml_rust_davvid::{Yaml, YamlEmitter};

/// Renders `data` as YAML, emitting multi-line strings such as commit
/// bodies as literal block scalars instead of escaped one-liners.
pub fn to_yaml<T: Serialize>(data: &T) -> Result<String> {
    let value = serde_yaml::to_value(data).context("Failed to serialize value for YAML output")?;
    let node = to_node(value);

    let mut output = String::new();
    let mut emitter = YamlEmitter::new(&mut output);
    emitter.multiline_strings(true);
    emitter.dump(&node).context("Failed to emit YAML")?;

    Ok(output)
}

fn to_node(value: serde_yaml::Value) -> Yaml {
    match value {
        serde_yaml::Value::Null => Yaml::Null,
        serde_yaml::Value::Bool(b) => Yaml::Boolean(b),
        serde_yaml::Value::Number(n) => match n.as_i64() {
            Some(i) => Yaml::Integer(i),
            None => Yaml::Real(n.to_string()),
        },
        serde_yaml::Value::String(s) => Yaml::String(s),
        serde_yaml::Value::Sequence(items) => Yaml::Array(items.into_iter().map(to_node).collect()),
        serde_yaml::Value::Mapping(map) => Yaml::Hash(
            map.into_iter()
                .map(|(k, v)| (to_node(k), to_node(v)))
                .collect(),
        ),
        serde_yaml::Value::Tagged(tagged) => to_node(tagged.value),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::github::CommitRecord;

    fn record(message: &str) -> CommitRecord {
        CommitRecord {
            message: message.to_string(),
            author: "Ann".to_string(),
            date: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn single_line_fields_render_plainly() {
        let yaml = to_yaml(&vec![record("fix bug")]).unwrap();

        assert!(yaml.contains("message: fix bug"));
        assert!(yaml.contains("author: Ann"));
    }

    #[test]
    fn multi_line_messages_are_not_escaped() {
        let yaml = to_yaml(&vec![record("subject line\nbody line")]).unwrap();

        assert!(!yaml.contains("\\n"));
        assert!(yaml.lines().any(|line| line.trim() == "subject line"));
        assert!(yaml.lines().any(|line| line.trim() == "body line"));
    }

    #[test]
    fn integers_stay_integers() {
        #[derive(Serialize)]
        struct Summary {
            commits_processed: usize,
        }

        let yaml = to_yaml(&Summary {
            commits_processed: 3,
        })
        .unwrap();
        assert!(yaml.contains("commits_processed: 3"));
    }
}
