use std::f64::consts::PI;
use std::fmt;

use rand::Rng;
use serde::Serialize;

use crate::env::errors::SpaceError;

/// Element type of a `Box` space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DType {
    Float,
    Integer,
}

/// The set of values an environment accepts or produces.
///
/// Mirrors the Gymnasium space family closely enough to describe every
/// environment in the catalogue. Compound spaces (`Tuple`, `Dict`) hold
/// sub-spaces; `Dict` keeps its keys in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Space {
    Discrete {
        n: u64,
        start: i64,
    },
    Box {
        low: Vec<f64>,
        high: Vec<f64>,
        shape: Vec<usize>,
        dtype: DType,
    },
    MultiBinary {
        shape: Vec<usize>,
    },
    MultiDiscrete {
        nvec: Vec<u64>,
        shape: Vec<usize>,
    },
    Tuple {
        spaces: Vec<Space>,
    },
    Dict {
        spaces: Vec<(String, Space)>,
    },
}

/// A single value drawn from (or checked against) a [`Space`].
///
/// Arrays are stored flattened in row-major order next to their shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Sample {
    Discrete(i64),
    Array { data: Vec<f64>, shape: Vec<usize> },
    Tuple(Vec<Sample>),
    Dict(Vec<(String, Sample)>),
}

impl Space {
    pub fn discrete(n: u64) -> Self {
        Space::Discrete { n, start: 0 }
    }

    /// One-dimensional float box with per-element bounds.
    pub fn bounded(low: Vec<f64>, high: Vec<f64>) -> Self {
        debug_assert_eq!(low.len(), high.len());
        let shape = vec![low.len()];
        Space::Box {
            low,
            high,
            shape,
            dtype: DType::Float,
        }
    }

    /// Box of the given shape where every element shares the same bounds.
    pub fn uniform(low: f64, high: f64, shape: Vec<usize>, dtype: DType) -> Self {
        let len = shape.iter().product();
        Space::Box {
            low: vec![low; len],
            high: vec![high; len],
            shape,
            dtype,
        }
    }

    pub fn tuple(spaces: Vec<Space>) -> Self {
        Space::Tuple { spaces }
    }

    pub fn dict<K: Into<String>>(spaces: impl IntoIterator<Item = (K, Space)>) -> Self {
        Space::Dict {
            spaces: spaces.into_iter().map(|(k, s)| (k.into(), s)).collect(),
        }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Space::Discrete { .. } => Vec::new(),
            Space::Box { shape, .. }
            | Space::MultiBinary { shape }
            | Space::MultiDiscrete { shape, .. } => shape.clone(),
            Space::Tuple { spaces } => vec![spaces.len()],
            Space::Dict { spaces } => vec![spaces.len()],
        }
    }

    /// Looks up a named sub-space of a `Dict` space.
    pub fn get(&self, key: &str) -> Result<&Space, SpaceError> {
        match self {
            Space::Dict { spaces } => spaces
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, s)| s)
                .ok_or_else(|| SpaceError::MissingKey(key.to_string())),
            _ => Err(SpaceError::NotCompound(key.to_string())),
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Sample {
        match self {
            Space::Discrete { n, start } => {
                // Values above i64::MAX are not representable.
                let room = u64::try_from(i128::from(i64::MAX) - i128::from(*start) + 1)
                    .map_or(*n, |room| room.min(*n));
                let offset = if room == 0 { 0 } else { rng.gen_range(0..room) };
                // start + offset <= i64::MAX, so wrapping yields the exact sum.
                Sample::Discrete(start.wrapping_add(offset as i64))
            }
            Space::Box {
                low,
                high,
                shape,
                dtype,
            } => {
                let data = low
                    .iter()
                    .zip(high)
                    .map(|(&lo, &hi)| sample_interval(lo, hi, *dtype, rng))
                    .collect();
                Sample::Array {
                    data,
                    shape: shape.clone(),
                }
            }
            Space::MultiBinary { shape } => {
                let len = shape.iter().product();
                let data = (0..len)
                    .map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
                    .collect();
                Sample::Array {
                    data,
                    shape: shape.clone(),
                }
            }
            Space::MultiDiscrete { nvec, shape } => {
                let data = nvec
                    .iter()
                    .map(|&n| if n == 0 { 0.0 } else { rng.gen_range(0..n) as f64 })
                    .collect();
                Sample::Array {
                    data,
                    shape: shape.clone(),
                }
            }
            Space::Tuple { spaces } => Sample::Tuple(spaces.iter().map(|s| s.sample(rng)).collect()),
            Space::Dict { spaces } => Sample::Dict(
                spaces
                    .iter()
                    .map(|(k, s)| (k.clone(), s.sample(rng)))
                    .collect(),
            ),
        }
    }

    pub fn contains(&self, sample: &Sample) -> bool {
        match (self, sample) {
            (Space::Discrete { n, start }, Sample::Discrete(v)) => {
                let offset = i128::from(*v) - i128::from(*start);
                offset >= 0 && offset < i128::from(*n)
            }
            (
                Space::Box {
                    low,
                    high,
                    shape,
                    dtype,
                },
                Sample::Array { data, shape: got },
            ) => {
                shape == got
                    && data.len() == low.len()
                    && data.iter().zip(low.iter().zip(high)).all(|(&x, (&lo, &hi))| {
                        x >= lo && x <= hi && (*dtype == DType::Float || x.fract() == 0.0)
                    })
            }
            (Space::MultiBinary { shape }, Sample::Array { data, shape: got }) => {
                shape == got && data.iter().all(|&x| x == 0.0 || x == 1.0)
            }
            (Space::MultiDiscrete { nvec, shape }, Sample::Array { data, shape: got }) => {
                shape == got
                    && data.len() == nvec.len()
                    && data
                        .iter()
                        .zip(nvec)
                        .all(|(&x, &n)| x >= 0.0 && x.fract() == 0.0 && (x as u64) < n)
            }
            (Space::Tuple { spaces }, Sample::Tuple(items)) => {
                spaces.len() == items.len()
                    && spaces.iter().zip(items).all(|(s, v)| s.contains(v))
            }
            (Space::Dict { spaces }, Sample::Dict(items)) => {
                spaces.len() == items.len()
                    && spaces.iter().all(|(key, s)| {
                        items
                            .iter()
                            .find(|(k, _)| k == key)
                            .is_some_and(|(_, v)| s.contains(v))
                    })
            }
            _ => false,
        }
    }
}

// Same bounded/unbounded rules as Gymnasium's Box.sample.
fn sample_interval<R: Rng + ?Sized>(low: f64, high: f64, dtype: DType, rng: &mut R) -> f64 {
    let value = match (low.is_finite(), high.is_finite()) {
        (true, true) => {
            let hi = if dtype == DType::Integer { high + 1.0 } else { high };
            if hi > low { rng.gen_range(low..hi) } else { low }
        }
        (true, false) => low + exponential(rng),
        (false, true) => high - exponential(rng),
        (false, false) => standard_normal(rng),
    };
    match dtype {
        DType::Float => value,
        DType::Integer if low <= high => value.floor().clamp(low, high),
        DType::Integer => value.floor(),
    }
}

fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u1: f64 = 1.0 - rng.gen_range(0.0..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

fn exponential<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let u: f64 = 1.0 - rng.gen_range(0.0..1.0);
    -u.ln()
}

impl Sample {
    pub fn vector(data: Vec<f64>) -> Self {
        let shape = vec![data.len()];
        Sample::Array { data, shape }
    }

    pub fn shape(&self) -> Vec<usize> {
        match self {
            Sample::Discrete(_) => Vec::new(),
            Sample::Array { shape, .. } => shape.clone(),
            Sample::Tuple(items) => vec![items.len()],
            Sample::Dict(items) => vec![items.len()],
        }
    }

    pub fn as_discrete(&self) -> Option<i64> {
        match self {
            Sample::Discrete(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[f64]> {
        match self {
            Sample::Array { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Formats a shape the way numpy prints it: `()`, `(4,)`, `(210, 160, 3)`.
pub fn shape_repr(shape: &[usize]) -> String {
    match shape {
        [] => "()".to_string(),
        [n] => format!("({n},)"),
        dims => {
            let parts: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
            format!("({})", parts.join(", "))
        }
    }
}

impl fmt::Display for Space {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Space::Discrete { n, start: 0 } => write!(f, "Discrete({n})"),
            Space::Discrete { n, start } => write!(f, "Discrete({n}, start={start})"),
            Space::Box { shape, dtype, .. } => {
                let dtype = match dtype {
                    DType::Float => "float",
                    DType::Integer => "int",
                };
                write!(f, "Box({}, {dtype})", shape_repr(shape))
            }
            Space::MultiBinary { shape } => write!(f, "MultiBinary({})", shape_repr(shape)),
            Space::MultiDiscrete { nvec, .. } => write!(f, "MultiDiscrete({nvec:?})"),
            Space::Tuple { spaces } => {
                write!(f, "Tuple(")?;
                for (i, s) in spaces.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{s}")?;
                }
                write!(f, ")")
            }
            Space::Dict { spaces } => {
                write!(f, "Dict(")?;
                for (i, (k, s)) in spaces.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{k}': {s}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sample::Discrete(v) => write!(f, "{v}"),
            Sample::Array { data, .. } => write!(f, "{data:?}"),
            Sample::Tuple(items) => {
                let parts: Vec<String> = items.iter().map(|s| s.to_string()).collect();
                write!(f, "({})", parts.join(", "))
            }
            Sample::Dict(items) => {
                let parts: Vec<String> = items.iter().map(|(k, s)| format!("'{k}': {s}")).collect();
                write!(f, "{{{}}}", parts.join(", "))
            }
        }
    }
}
