use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Sensor features, in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Temperatura,
    Vibracion,
    Humedad,
    TiempoCiclo,
    EficienciaPorcentual,
    ConsumoEnergia,
}

impl Feature {
    pub const ALL: [Feature; 6] = [
        Feature::Temperatura,
        Feature::Vibracion,
        Feature::Humedad,
        Feature::TiempoCiclo,
        Feature::EficienciaPorcentual,
        Feature::ConsumoEnergia,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Feature::Temperatura => "temperatura",
            Feature::Vibracion => "vibracion",
            Feature::Humedad => "humedad",
            Feature::TiempoCiclo => "tiempo_ciclo",
            Feature::EficienciaPorcentual => "eficiencia_porcentual",
            Feature::ConsumoEnergia => "consumo_energia",
        }
    }

    /// Whether the scorer reads this feature. The others are required
    /// inputs whose values are never inspected.
    pub fn is_scored(&self) -> bool {
        !matches!(self, Feature::TiempoCiclo | Feature::ConsumoEnergia)
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a JSON object could not be turned into a [`SensorReading`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReadingError {
    /// Required features absent from the payload, canonical order
    #[error("Campos faltantes: {}", join_names(.0))]
    Missing(Vec<Feature>),

    #[error("valor no numérico para '{feature}'")]
    NotNumeric { feature: Feature },
}

fn join_names(features: &[Feature]) -> String {
    features
        .iter()
        .map(Feature::name)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One snapshot of a machine's sensors
///
/// Features may be absent when a reading is built by hand; the scorer
/// falls back to per-rule defaults for those.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorReading {
    values: BTreeMap<Feature, f64>,
}

impl SensorReading {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        self.values.insert(feature, value);
        self
    }

    pub fn get(&self, feature: Feature) -> Option<f64> {
        self.values.get(&feature).copied()
    }

    /// Build a complete reading from a JSON object.
    ///
    /// Presence of every feature is checked first so the caller gets the
    /// full list of missing names in one go. Scored features must then be
    /// JSON numbers or booleans (`true` = 1, `false` = 0); `null`, strings
    /// and the like are rejected. Unscored features only need to be
    /// present and are kept when numeric.
    pub fn from_json(data: &Map<String, Value>) -> Result<Self, ReadingError> {
        let missing: Vec<Feature> = Feature::ALL
            .iter()
            .copied()
            .filter(|f| !data.contains_key(f.name()))
            .collect();
        if !missing.is_empty() {
            return Err(ReadingError::Missing(missing));
        }

        let mut reading = Self::new();
        for feature in Feature::ALL {
            let value = data.get(feature.name()).and_then(numeric);
            match value {
                Some(v) => {
                    reading.values.insert(feature, v);
                }
                None if feature.is_scored() => {
                    return Err(ReadingError::NotNumeric { feature });
                }
                None => {}
            }
        }
        Ok(reading)
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        other => other.as_f64(),
    }
}

/// Binary outcome of the scorer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureLabel {
    Normal,
    Failure,
}

impl FailureLabel {
    pub fn as_binary(&self) -> u8 {
        match self {
            FailureLabel::Normal => 0,
            FailureLabel::Failure => 1,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            FailureLabel::Normal => "Sin Fallo",
            FailureLabel::Failure => "Fallo Detectado",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub label: FailureLabel,
    pub risk_score: f64,
    pub confidence: f64,
}

/// Prediction plus the maintenance advice derived from it
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub prediction: Prediction,
    pub recommendations: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_payload() -> Map<String, Value> {
        json!({
            "temperatura": 75.5,
            "vibracion": 3,
            "humedad": 60.0,
            "tiempo_ciclo": 120.0,
            "eficiencia_porcentual": 88.0,
            "consumo_energia": 45.2,
        })
        .as_object()
        .cloned()
        .unwrap()
    }

    #[test]
    fn test_from_json_complete() {
        let reading = SensorReading::from_json(&full_payload()).unwrap();
        assert_eq!(reading.get(Feature::Temperatura), Some(75.5));
        // integers are accepted as numbers
        assert_eq!(reading.get(Feature::Vibracion), Some(3.0));
        assert_eq!(reading.get(Feature::ConsumoEnergia), Some(45.2));
    }

    #[test]
    fn test_missing_fields_listed_in_canonical_order() {
        let mut data = full_payload();
        data.remove("consumo_energia");
        data.remove("humedad");
        let err = SensorReading::from_json(&data).unwrap_err();
        assert_eq!(
            err,
            ReadingError::Missing(vec![Feature::Humedad, Feature::ConsumoEnergia])
        );
        assert_eq!(err.to_string(), "Campos faltantes: humedad, consumo_energia");
    }

    #[test]
    fn test_empty_payload_misses_everything() {
        let err = SensorReading::from_json(&Map::new()).unwrap_err();
        match err {
            ReadingError::Missing(features) => assert_eq!(features, Feature::ALL.to_vec()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let mut data = full_payload();
        data.insert("vibracion".into(), json!("alta"));
        let err = SensorReading::from_json(&data).unwrap_err();
        assert_eq!(err, ReadingError::NotNumeric { feature: Feature::Vibracion });

        data.insert("vibracion".into(), Value::Null);
        assert!(SensorReading::from_json(&data).is_err());
    }

    #[test]
    fn test_unscored_features_only_need_presence() {
        let mut data = full_payload();
        data.insert("tiempo_ciclo".into(), Value::Null);
        data.insert("consumo_energia".into(), json!("n/a"));
        let reading = SensorReading::from_json(&data).unwrap();
        assert_eq!(reading.get(Feature::TiempoCiclo), None);
        assert_eq!(reading.get(Feature::ConsumoEnergia), None);
        assert_eq!(reading.get(Feature::Temperatura), Some(75.5));

        // still required
        data.remove("tiempo_ciclo");
        assert_eq!(
            SensorReading::from_json(&data).unwrap_err(),
            ReadingError::Missing(vec![Feature::TiempoCiclo])
        );
    }

    #[test]
    fn test_booleans_count_as_zero_or_one() {
        let mut data = full_payload();
        data.insert("vibracion".into(), json!(true));
        data.insert("humedad".into(), json!(false));
        let reading = SensorReading::from_json(&data).unwrap();
        assert_eq!(reading.get(Feature::Vibracion), Some(1.0));
        assert_eq!(reading.get(Feature::Humedad), Some(0.0));
    }

    #[test]
    fn test_label_rendering() {
        assert_eq!(FailureLabel::Failure.as_binary(), 1);
        assert_eq!(FailureLabel::Normal.as_binary(), 0);
        assert_eq!(FailureLabel::Failure.describe(), "Fallo Detectado");
        assert_eq!(FailureLabel::Normal.describe(), "Sin Fallo");
    }
}
