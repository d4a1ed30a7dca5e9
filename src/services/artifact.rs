use crate::core::factors::CollaborativeModel;
use crate::core::skills::materialize_skills;
use crate::models::ModelSnapshot;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur reading or writing the model artifact
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid artifact: {0}")]
    Invalid(String),
}

/// JSON file holding the profile tables, rating log and fitted model
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and validate the artifact
    ///
    /// The snapshot is returned as stored; candidates without derived skill
    /// tags stay unmaterialized and are rejected later by the content scorer.
    pub fn load(&self) -> Result<ModelSnapshot, ArtifactError> {
        let json = fs::read_to_string(&self.path).map_err(|source| ArtifactError::Io {
            path: self.path.clone(),
            source,
        })?;

        let snapshot: ModelSnapshot = serde_json::from_str(&json)?;
        validate(&snapshot)?;

        tracing::info!(
            "Loaded artifact {} ({} au pairs, {} households, {} ratings, collaborative: {})",
            self.path.display(),
            snapshot.candidates.len(),
            snapshot.households.len(),
            snapshot.ratings.len(),
            snapshot.collaborative.is_fitted()
        );

        Ok(snapshot)
    }

    /// Write the snapshot back as pretty-printed JSON
    pub fn save(&self, snapshot: &ModelSnapshot) -> Result<(), ArtifactError> {
        validate(snapshot)?;

        let json = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, json).map_err(|source| ArtifactError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!("Saved artifact {}", self.path.display());
        Ok(())
    }

    /// Derive skill tags for every au pair and persist the result
    ///
    /// Returns how many au pairs were updated.
    pub fn materialize(&self) -> Result<usize, ArtifactError> {
        let mut snapshot = self.load()?;
        let updated = materialize_skills(&mut snapshot.candidates);
        self.save(&snapshot)?;

        tracing::info!("Materialized skill tags for {} au pairs", updated);
        Ok(updated)
    }
}

/// Check ids are unique and ratings fall within 1..=5
fn validate(snapshot: &ModelSnapshot) -> Result<(), ArtifactError> {
    let mut seen = HashSet::new();
    for candidate in &snapshot.candidates {
        if !seen.insert(candidate.id) {
            return Err(ArtifactError::Invalid(format!("duplicate au pair id {}", candidate.id)));
        }
        if !(0.0..=5.0).contains(&candidate.rating) {
            return Err(ArtifactError::Invalid(format!(
                "au pair {} has rating {} outside 0-5",
                candidate.id, candidate.rating
            )));
        }
    }

    let mut seen = HashSet::new();
    for household in &snapshot.households {
        if !seen.insert(household.id) {
            return Err(ArtifactError::Invalid(format!("duplicate household id {}", household.id)));
        }
    }

    if let Some(record) = snapshot
        .ratings
        .records()
        .iter()
        .find(|record| !(1..=5).contains(&record.rating))
    {
        return Err(ArtifactError::Invalid(format!(
            "rating {} from household {} for au pair {} is outside 1-5",
            record.rating, record.household_id, record.candidate_id
        )));
    }

    if let CollaborativeModel::Fitted(model) = &snapshot.collaborative {
        let (low, high) = model.rating_scale;
        if !(low.is_finite() && high.is_finite() && low <= high) {
            return Err(ArtifactError::Invalid(format!(
                "collaborative rating scale ({}, {}) is not an ordered finite range",
                low, high
            )));
        }
        if !model.global_mean.is_finite() {
            return Err(ArtifactError::Invalid(format!(
                "collaborative global mean {} is not finite",
                model.global_mean
            )));
        }
    }

    Ok(())
}
