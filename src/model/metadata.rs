use serde::Serialize;

use crate::model::types::Feature;

/// Static description of the deployed model, served by `/model/info`
#[derive(Debug, Clone, Serialize)]
pub struct ModelMetadata {
    pub model_version: &'static str,
    pub features: Vec<Feature>,
    pub model_type: &'static str,
    pub target: &'static str,
    pub description: &'static str,
}

impl ModelMetadata {
    pub fn current() -> Self {
        Self {
            model_version: "1.0",
            features: Feature::ALL.to_vec(),
            model_type: "Clasificación Binaria",
            target: "fallo_detectado",
            description: "Modelo para predicción de fallos en maquinaria industrial",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_feature_names() {
        let json = serde_json::to_value(ModelMetadata::current()).unwrap();
        assert_eq!(json["model_version"], "1.0");
        assert_eq!(
            json["features"],
            serde_json::json!([
                "temperatura",
                "vibracion",
                "humedad",
                "tiempo_ciclo",
                "eficiencia_porcentual",
                "consumo_energia"
            ])
        );
        assert_eq!(json["target"], "fallo_detectado");
    }
}
