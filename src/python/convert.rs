//! Conversions between Gymnasium objects and [`Space`], [`Sample`] and JSON.

use gymcheck_core::env::{DType, Info, Sample, Space, SpaceError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyFloat, PyInt, PyList, PyString, PyTuple};
use serde_json::{Number, Value};
use tracing::debug;

use crate::python::errors::BridgeError;

/// Describes a `gymnasium.spaces` instance, dispatching on its class name.
pub fn space_from_py(space: &Bound<'_, PyAny>) -> Result<Space, BridgeError> {
    let kind = space.get_type().name()?.to_string();
    let converted = match kind.as_str() {
        "Discrete" => Space::Discrete {
            n: space.getattr("n")?.extract()?,
            start: space.getattr("start")?.extract()?,
        },
        "Box" => Space::Box {
            low: flat(&space.getattr("low")?)?,
            high: flat(&space.getattr("high")?)?,
            shape: space.getattr("shape")?.extract()?,
            dtype: dtype_of(space)?,
        },
        "MultiBinary" => Space::MultiBinary {
            shape: space.getattr("shape")?.extract()?,
        },
        "MultiDiscrete" => Space::MultiDiscrete {
            nvec: flat(&space.getattr("nvec")?)?,
            shape: space.getattr("shape")?.extract()?,
        },
        "Tuple" => Space::Tuple {
            spaces: space
                .getattr("spaces")?
                .try_iter()?
                .map(|sub| space_from_py(&sub?))
                .collect::<Result<_, _>>()?,
        },
        "Dict" => {
            let mut spaces = Vec::new();
            for item in space.getattr("spaces")?.call_method0("items")?.try_iter()? {
                let (key, sub): (String, Bound<'_, PyAny>) = item?.extract()?;
                spaces.push((key, space_from_py(&sub)?));
            }
            Space::Dict { spaces }
        }
        other => return Err(SpaceError::Unsupported(other.to_string()).into()),
    };
    Ok(converted)
}

fn dtype_of(space: &Bound<'_, PyAny>) -> PyResult<DType> {
    let kind: String = space.getattr("dtype")?.getattr("kind")?.extract()?;
    Ok(match kind.as_str() {
        "i" | "u" | "b" => DType::Integer,
        _ => DType::Float,
    })
}

fn flat<'py, T: FromPyObject<'py>>(array: &Bound<'py, PyAny>) -> PyResult<Vec<T>> {
    array.call_method0("flatten")?.call_method0("tolist")?.extract()
}

/// Rust view of a value returned by Gymnasium (observation or sample).
///
/// Never fails: anything without a sensible representation is logged and
/// kept as an empty tuple, since returned values are not validated.
pub fn sample_from_py(value: &Bound<'_, PyAny>) -> Sample {
    match convert_sample(value) {
        Ok(sample) => sample,
        Err(err) => {
            debug!(error = %err, "value has no sample representation");
            Sample::Tuple(Vec::new())
        }
    }
}

fn convert_sample(value: &Bound<'_, PyAny>) -> PyResult<Sample> {
    if let Ok(b) = value.downcast::<PyBool>() {
        return Ok(Sample::Discrete(i64::from(b.is_true())));
    }
    if value.is_instance_of::<PyInt>() {
        return Ok(Sample::Discrete(value.extract()?));
    }
    if let Ok(dict) = value.downcast::<PyDict>() {
        return dict
            .iter()
            .map(|(key, item)| -> PyResult<(String, Sample)> {
                Ok((key.str()?.to_string(), convert_sample(&item)?))
            })
            .collect::<PyResult<_>>()
            .map(Sample::Dict);
    }
    if value.is_instance_of::<PyTuple>() || value.is_instance_of::<PyList>() {
        return value
            .try_iter()?
            .map(|item| convert_sample(&item?))
            .collect::<PyResult<_>>()
            .map(Sample::Tuple);
    }

    let numpy = value.py().import("numpy")?;
    if value.is_instance(&numpy.getattr("integer")?)? {
        return Ok(Sample::Discrete(value.extract()?));
    }
    let array = numpy.call_method1("asarray", (value, "float64"))?;
    Ok(Sample::Array {
        data: flat(&array)?,
        shape: array.getattr("shape")?.extract()?,
    })
}

/// Builds the Python value of an action for the `gymnasium.spaces` instance
/// `space`. Arrays are cast to the space's numpy dtype.
pub fn sample_to_py<'py>(
    space: &Bound<'py, PyAny>,
    sample: &Sample,
) -> Result<Bound<'py, PyAny>, BridgeError> {
    let py = space.py();
    let value = match sample {
        Sample::Discrete(v) => v.into_pyobject(py).map_err(PyErr::from)?.into_any(),
        Sample::Array { data, shape } => py
            .import("numpy")?
            .call_method1("asarray", (data.clone(), space.getattr("dtype")?))?
            .call_method1("reshape", (shape.clone(),))?,
        Sample::Tuple(items) => {
            let subspaces = space.getattr("spaces")?;
            let converted = items
                .iter()
                .enumerate()
                .map(|(i, item)| sample_to_py(&subspaces.get_item(i)?, item))
                .collect::<Result<Vec<_>, _>>()?;
            PyTuple::new(py, converted)?.into_any()
        }
        Sample::Dict(items) => {
            let subspaces = space.getattr("spaces")?;
            let dict = PyDict::new(py);
            for (key, item) in items {
                dict.set_item(key, sample_to_py(&subspaces.get_item(key)?, item)?)?;
            }
            dict.into_any()
        }
    };
    Ok(value)
}

/// Converts an `info` dict. Anything that is not a dict yields an empty
/// map; values that cannot be rendered become `null`.
pub fn info_from_py(value: &Bound<'_, PyAny>) -> Info {
    let mut info = Info::new();
    let Ok(dict) = value.downcast::<PyDict>() else {
        debug!(kind = %value.get_type(), "info is not a dict");
        return info;
    };
    for (key, item) in dict.iter() {
        let key = match key.downcast::<PyString>() {
            Ok(s) => s.to_string(),
            Err(_) => match key.str() {
                Ok(s) => s.to_string(),
                Err(_) => continue,
            },
        };
        info.insert(key, json_from_py(&item).unwrap_or(Value::Null));
    }
    info
}

/// Best-effort JSON rendering of an `info` value. numpy arrays and scalars
/// go through `tolist()`; anything else unknown becomes its `str()`.
pub fn json_from_py(value: &Bound<'_, PyAny>) -> PyResult<Value> {
    if value.is_none() {
        return Ok(Value::Null);
    }
    if let Ok(b) = value.downcast::<PyBool>() {
        return Ok(Value::Bool(b.is_true()));
    }
    if value.is_instance_of::<PyInt>() {
        return Ok(match value.extract::<i64>() {
            Ok(i) => Value::from(i),
            Err(_) => Value::String(value.str()?.to_string()),
        });
    }
    if let Ok(f) = value.downcast::<PyFloat>() {
        return Ok(Number::from_f64(f.value()).map_or(Value::Null, Value::Number));
    }
    if let Ok(s) = value.downcast::<PyString>() {
        return Ok(Value::String(s.to_cow()?.into_owned()));
    }
    if value.is_instance_of::<PyDict>() {
        return Ok(Value::Object(info_from_py(value)));
    }
    if value.is_instance_of::<PyList>() || value.is_instance_of::<PyTuple>() {
        return value
            .try_iter()?
            .map(|item| json_from_py(&item?))
            .collect::<PyResult<Vec<_>>>()
            .map(Value::Array);
    }
    if value.hasattr("tolist")? {
        return json_from_py(&value.call_method0("tolist")?);
    }
    Ok(Value::String(value.str()?.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FAKE_SPACES: &std::ffi::CStr = c"
class Discrete:
    def __init__(self, n, start=0):
        self.n = n
        self.start = start

class Tuple:
    def __init__(self, spaces):
        self.spaces = tuple(spaces)

class Dict:
    def __init__(self, spaces):
        self.spaces = dict(spaces)

class Text:
    pass
";

    fn fake_spaces(py: Python<'_>) -> Bound<'_, PyModule> {
        PyModule::from_code(py, FAKE_SPACES, c"spaces.py", c"spaces").unwrap()
    }

    #[test]
    fn converts_nested_spaces_in_key_order() {
        Python::with_gil(|py| {
            let spaces = fake_spaces(py);
            let discrete = spaces.getattr("Discrete").unwrap();
            let obs = discrete.call1((4,)).unwrap();
            let goal = discrete.call1((2, 1)).unwrap();
            let inner = PyDict::new(py);
            inner.set_item("observation", obs).unwrap();
            inner.set_item("goal", goal).unwrap();
            let dict = spaces.getattr("Dict").unwrap().call1((inner,)).unwrap();

            let space = space_from_py(&dict).unwrap();
            assert_eq!(
                space,
                Space::dict([
                    ("observation", Space::discrete(4)),
                    ("goal", Space::Discrete { n: 2, start: 1 }),
                ])
            );
            assert_eq!(space.get("observation").unwrap(), &Space::discrete(4));
        });
    }

    #[test]
    fn unknown_space_kinds_are_unsupported() {
        Python::with_gil(|py| {
            let text = fake_spaces(py).getattr("Text").unwrap().call0().unwrap();
            match space_from_py(&text) {
                Err(BridgeError::Space(SpaceError::Unsupported(kind))) => assert_eq!(kind, "Text"),
                other => panic!("expected unsupported space, got {other:?}"),
            }
        });
    }

    #[test]
    fn discrete_values_round_trip_through_python_ints() {
        Python::with_gil(|py| {
            let spaces = fake_spaces(py);
            let discrete = spaces.getattr("Discrete").unwrap().call1((6,)).unwrap();
            let value = sample_to_py(&discrete, &Sample::Discrete(3)).unwrap();
            assert_eq!(value.extract::<i64>().unwrap(), 3);
            assert_eq!(sample_from_py(&value), Sample::Discrete(3));
        });
    }

    #[test]
    fn containers_convert_without_consulting_a_space() {
        Python::with_gil(|py| {
            let value = py.eval(c"(1, {'a': True}, [2, 3])", None, None).unwrap();
            assert_eq!(
                sample_from_py(&value),
                Sample::Tuple(vec![
                    Sample::Discrete(1),
                    Sample::Dict(vec![("a".to_string(), Sample::Discrete(1))]),
                    Sample::Tuple(vec![Sample::Discrete(2), Sample::Discrete(3)]),
                ])
            );
        });
    }

    #[test]
    fn unrepresentable_values_do_not_fail() {
        Python::with_gil(|py| {
            let value = py.eval(c"object()", None, None).unwrap();
            assert_eq!(sample_from_py(&value), Sample::Tuple(Vec::new()));
        });
    }

    #[test]
    fn info_dicts_become_json() {
        Python::with_gil(|py| {
            let value = py
                .eval(
                    c"{'lives': 3, 'success': True, 'prob': 0.5, 'tag': 'x', 'none': None, 'pos': (1, [2.5])}",
                    None,
                    None,
                )
                .unwrap();
            assert_eq!(
                Value::Object(info_from_py(&value)),
                json!({
                    "lives": 3,
                    "success": true,
                    "prob": 0.5,
                    "tag": "x",
                    "none": null,
                    "pos": [1, [2.5]],
                })
            );
        });
    }

    #[test]
    fn non_dict_info_is_empty() {
        Python::with_gil(|py| {
            let value = py.eval(c"[1, 2]", None, None).unwrap();
            assert!(info_from_py(&value).is_empty());
        });
    }
}
