//! Index-aligned pairing of projection matrices and silhouettes.

use crate::core::{CarveError, ProjectionMatrix, Silhouette};

/// One calibrated view: its projection and the mask seen through it.
#[derive(Clone, Debug)]
pub struct CameraView {
    /// Source image file name (empty when built from bare arrays)
    pub name: String,
    pub projection: ProjectionMatrix,
    pub silhouette: Silhouette,
}

impl CameraView {
    pub fn new(name: impl Into<String>, projection: ProjectionMatrix, silhouette: Silhouette) -> Self {
        Self {
            name: name.into(),
            projection,
            silhouette,
        }
    }
}

/// A non-empty, ordered set of camera views.
#[derive(Clone, Debug)]
pub struct CameraSet {
    views: Vec<CameraView>,
}

impl CameraSet {
    /// Build from already paired views.
    pub fn new(views: Vec<CameraView>) -> Result<Self, CarveError> {
        if views.is_empty() {
            return Err(CarveError::CameraSilhouetteMismatch(
                "camera set is empty".to_string(),
            ));
        }
        Ok(Self { views })
    }

    /// Pair two parallel arrays index-for-index.
    pub fn from_parallel(
        projections: Vec<ProjectionMatrix>,
        silhouettes: Vec<Silhouette>,
    ) -> Result<Self, CarveError> {
        if projections.len() != silhouettes.len() {
            return Err(CarveError::CameraSilhouetteMismatch(format!(
                "{} projection matrices but {} silhouettes",
                projections.len(),
                silhouettes.len()
            )));
        }

        let views = projections
            .into_iter()
            .zip(silhouettes)
            .map(|(projection, silhouette)| CameraView::new(String::new(), projection, silhouette))
            .collect();
        Self::new(views)
    }

    pub fn views(&self) -> &[CameraView] {
        &self.views
    }

    pub fn get(&self, index: usize) -> Option<&CameraView> {
        self.views.get(index)
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    /// Whether the set holds no views; sets built through `new` never do.
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CameraView> {
        self.views.iter()
    }
}
