//! The persisted crop-disease scan record.

use super::ScanId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Treatment guidance embedded in a [`ScanRecord`].
///
/// Has no identity of its own; it is stored inline with its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreatmentAdvice {
    /// Chemical treatment.
    pub chemical: String,
    /// Organic treatment.
    pub organic: String,
    /// Application schedule.
    pub schedule: String,
    /// Dosage or quantity.
    pub quantity: String,
}

impl TreatmentAdvice {
    pub fn with_chemical(mut self, chemical: impl Into<String>) -> Self {
        self.chemical = chemical.into();
        self
    }

    pub fn with_organic(mut self, organic: impl Into<String>) -> Self {
        self.organic = organic.into();
        self
    }

    pub fn with_schedule(mut self, schedule: impl Into<String>) -> Self {
        self.schedule = schedule.into();
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    /// True when no treatment text is present at all.
    pub fn is_empty(&self) -> bool {
        self.chemical.is_empty()
            && self.organic.is_empty()
            && self.schedule.is_empty()
            && self.quantity.is_empty()
    }
}

/// One crop-disease diagnosis event.
///
/// Every field is public and mutable. Nothing is validated here; the store
/// only cares about `id`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScanRecord {
    /// Store key, assigned on first save when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<ScanId>,
    /// Owning user's identifier.
    pub user_id: String,
    /// Crop name.
    pub crop: String,
    /// Diagnosed disease.
    pub disease: String,
    /// Free-text symptom description.
    pub symptoms: String,
    /// Recommended treatment.
    pub treatment: TreatmentAdvice,
    /// Free-text precautions.
    pub precautions: String,
    /// Location of the scanned image.
    pub image_url: String,
    /// Diagnostic confidence, no enforced range.
    pub confidence_score: Option<f64>,
    /// When the scan occurred.
    pub scan_date: Option<DateTime<Utc>>,
}

impl ScanRecord {
    /// Start a record for the given user with every other field unset.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: ScanId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = crop.into();
        self
    }

    pub fn with_disease(mut self, disease: impl Into<String>) -> Self {
        self.disease = disease.into();
        self
    }

    pub fn with_symptoms(mut self, symptoms: impl Into<String>) -> Self {
        self.symptoms = symptoms.into();
        self
    }

    pub fn with_treatment(mut self, treatment: TreatmentAdvice) -> Self {
        self.treatment = treatment;
        self
    }

    pub fn with_precautions(mut self, precautions: impl Into<String>) -> Self {
        self.precautions = precautions.into();
        self
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = image_url.into();
        self
    }

    pub fn with_confidence(mut self, score: f64) -> Self {
        self.confidence_score = Some(score);
        self
    }

    pub fn with_scan_date(mut self, date: DateTime<Utc>) -> Self {
        self.scan_date = Some(date);
        self
    }

    /// Whether the diagnosis names a healthy plant rather than a disease.
    pub fn is_healthy(&self) -> bool {
        self.disease.to_lowercase().contains("healthy")
    }

    /// Get a short summary of the scan.
    pub fn summary(&self) -> String {
        let id = self.id.as_ref().map_or("unsaved", ScanId::short);
        let confidence = self
            .confidence_score
            .map_or_else(|| "n/a".to_string(), |c| format!("{:.2}%", c * 100.0));
        format!(
            "[{}] {} / {} ({}) - user {}",
            id, self.crop, self.disease, confidence, self.user_id
        )
    }
}
