use crate::classifier::ClassifyError;
use crate::classifier::artifacts::ArtifactError;

/// Maps encoded class indices back to label strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Result<Self, ArtifactError> {
        if classes.is_empty() {
            return Err(ArtifactError::EmptyEncoder);
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn inverse_transform(&self, encoded: usize) -> Result<&str, ClassifyError> {
        self.classes
            .get(encoded)
            .map(String::as_str)
            .ok_or(ClassifyError::UnknownClass {
                encoded,
                known: self.classes.len(),
            })
    }
}
