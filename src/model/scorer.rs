use crate::model::metadata::ModelMetadata;
use crate::model::types::{FailureLabel, Feature, Prediction, PredictionResult, SensorReading};

/// Risk score must exceed this for a failure prediction
const DECISION_THRESHOLD: f64 = 0.5;
const MAX_CONFIDENCE: f64 = 0.95;
const NORMAL_MESSAGE: &str = "Sistema funcionando normalmente";

#[derive(Debug, Clone, Copy)]
enum Comparison {
    Above,
    Below,
}

/// One threshold check: if the feature crosses the limit, the weight is
/// added to the risk score and the message becomes a recommendation.
#[derive(Debug, Clone, Copy)]
struct Rule {
    feature: Feature,
    comparison: Comparison,
    limit: f64,
    weight: f64,
    /// Used when the reading does not carry the feature
    default: f64,
    message: &'static str,
}

impl Rule {
    fn triggered(&self, reading: &SensorReading) -> bool {
        let value = reading.get(self.feature).unwrap_or(self.default);
        match self.comparison {
            Comparison::Above => value > self.limit,
            Comparison::Below => value < self.limit,
        }
    }
}

/// Rules in recommendation order. `tiempo_ciclo` and `consumo_energia`
/// are required inputs but carry no rule.
const RULES: [Rule; 4] = [
    Rule {
        feature: Feature::Temperatura,
        comparison: Comparison::Above,
        limit: 80.0,
        weight: 0.3,
        default: 0.0,
        message: "Revisar sistema de refrigeración",
    },
    Rule {
        feature: Feature::Vibracion,
        comparison: Comparison::Above,
        limit: 5.0,
        weight: 0.4,
        default: 0.0,
        message: "Inspeccionar rodamientos y alineación",
    },
    Rule {
        feature: Feature::Humedad,
        comparison: Comparison::Above,
        limit: 70.0,
        weight: 0.2,
        default: 0.0,
        message: "Verificar sistema de ventilación",
    },
    Rule {
        feature: Feature::EficienciaPorcentual,
        comparison: Comparison::Below,
        limit: 70.0,
        weight: 0.3,
        default: 100.0,
        message: "Programar mantenimiento preventivo",
    },
];

/// Threshold-weighted failure model
///
/// Stateless apart from its metadata; built once at startup and shared
/// read-only across requests.
#[derive(Debug, Clone)]
pub struct ThresholdModel {
    metadata: ModelMetadata,
}

impl ThresholdModel {
    pub fn new() -> Self {
        Self {
            metadata: ModelMetadata::current(),
        }
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn version(&self) -> &'static str {
        self.metadata.model_version
    }

    /// Score a reading
    ///
    ///   risk_score = sum of weights of triggered rules
    ///   label      = Failure if risk_score > 0.5, else Normal
    ///   confidence = min(risk_score, 0.95)     for Failure
    ///              = min(1 - risk_score, 0.95) for Normal
    pub fn predict(&self, reading: &SensorReading) -> Prediction {
        let risk_score: f64 = RULES
            .iter()
            .filter(|rule| rule.triggered(reading))
            .fold(0.0, |acc, rule| acc + rule.weight);

        let (label, raw) = if risk_score > DECISION_THRESHOLD {
            (FailureLabel::Failure, risk_score)
        } else {
            (FailureLabel::Normal, 1.0 - risk_score)
        };

        Prediction {
            label,
            risk_score,
            confidence: raw.min(MAX_CONFIDENCE),
        }
    }

    /// Maintenance advice for a reading given its predicted label
    pub fn recommend(&self, reading: &SensorReading, label: FailureLabel) -> Vec<&'static str> {
        match label {
            FailureLabel::Failure => RULES
                .iter()
                .filter(|rule| rule.triggered(reading))
                .map(|rule| rule.message)
                .collect(),
            FailureLabel::Normal => vec![NORMAL_MESSAGE],
        }
    }

    pub fn assess(&self, reading: &SensorReading) -> PredictionResult {
        let prediction = self.predict(reading);
        let recommendations = self.recommend(reading, prediction.label);
        PredictionResult {
            prediction,
            recommendations,
        }
    }
}

impl Default for ThresholdModel {
    fn default() -> Self {
        Self::new()
    }
}
