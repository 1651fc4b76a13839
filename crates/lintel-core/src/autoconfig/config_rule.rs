//! Candidate rule configurations derived from option schemas

use serde_json::{Map, Value};

/// Severity given to every generated candidate
const ERROR_SEVERITY: u64 = 2;

/// Append `value` to `tuple`, splicing it in when it is itself an array
fn concat(tuple: &[Value], value: &Value) -> Vec<Value> {
    let mut combined = tuple.to_vec();
    match value {
        Value::Array(items) => combined.extend(items.iter().cloned()),
        other => combined.push(other.clone()),
    }
    combined
}

/// Every tuple of `tuples` extended by every value of `values`
///
/// When there are no tuples yet, each value becomes a tuple of its own.
fn combine_arrays(tuples: &[Vec<Value>], values: &[Value]) -> Vec<Vec<Value>> {
    if tuples.is_empty() {
        return values.iter().map(|value| vec![value.clone()]).collect();
    }
    if values.is_empty() {
        return tuples.to_vec();
    }
    tuples
        .iter()
        .flat_map(|tuple| values.iter().map(move |value| concat(tuple, value)))
        .collect()
}

/// Cartesian product of two lists of partial option objects
fn combine_property_objects(
    left: Vec<Map<String, Value>>,
    right: Vec<Map<String, Value>>,
) -> Vec<Map<String, Value>> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }
    left.iter()
        .flat_map(|first| {
            right.iter().map(move |second| {
                let mut combined = first.clone();
                combined.extend(second.iter().map(|(key, value)| (key.clone(), value.clone())));
                combined
            })
        })
        .collect()
}

/// Every combination of an object schema's enumerable properties
///
/// A property is enumerable when it lists an `enum` or is a boolean.
fn object_configs(schema: &Value) -> Vec<Value> {
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Vec::new();
    };

    let mut groups: Vec<Vec<Map<String, Value>>> = Vec::new();
    for (property, property_schema) in properties {
        let mut values = Vec::new();
        if let Some(options) = property_schema.get("enum").and_then(Value::as_array) {
            values.extend(options.iter().cloned());
        }
        if property_schema.get("type").and_then(Value::as_str) == Some("boolean") {
            values.extend([Value::Bool(true), Value::Bool(false)]);
        }
        if values.is_empty() {
            continue;
        }
        groups.push(
            values
                .into_iter()
                .map(|value| {
                    let mut object = Map::new();
                    object.insert(property.clone(), value);
                    object
                })
                .collect(),
        );
    }

    groups
        .into_iter()
        .fold(Vec::new(), combine_property_objects)
        .into_iter()
        .map(Value::Object)
        .collect()
}

/// Candidate configurations for a rule's positional option schema
///
/// Options are expanded left to right. An `enum` option multiplies the
/// tuples built so far by each of its values while keeping the shorter
/// tuples. An `object` option does the same with every combination of its
/// enumerable properties. Any other option, or an object without enumerable
/// properties, ends the expansion since later options could not be reached
/// without it.
///
/// Every tuple is prefixed with the error severity, and the bare severity is
/// the first candidate. A schema that is not an array yields just `[2]`.
pub fn generate_configs_from_schema(schema: &Value) -> Vec<Value> {
    let mut tuples: Vec<Vec<Value>> = Vec::new();

    if let Some(options) = schema.as_array() {
        for option in options {
            let values = if let Some(values) = option.get("enum").and_then(Value::as_array) {
                values.clone()
            } else if option.get("type").and_then(Value::as_str) == Some("object") {
                let objects = object_configs(option);
                if objects.is_empty() {
                    break;
                }
                objects
            } else {
                break;
            };
            let extended = combine_arrays(&tuples, &values);
            tuples.extend(extended);
        }
    }

    std::iter::once(Value::from(ERROR_SEVERITY))
        .chain(tuples.into_iter().map(|tuple| {
            let mut config = vec![Value::from(ERROR_SEVERITY)];
            config.extend(tuple);
            Value::Array(config)
        }))
        .collect()
}
