use anyhow::{bail, ensure, Result};
use serde::{Deserialize, Serialize};

/// Number of box geometry channels (`cx, cy, w, h`) ahead of the class channels.
pub const BOX_CHANNELS: usize = 4;

/// Declared `[1, C, E]` shape of the detector output, with `C = 4 + num_classes`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputShape {
    pub num_classes: usize,
    pub num_elements: usize,
}

impl OutputShape {
    pub fn new(num_classes: usize, num_elements: usize) -> Self {
        Self {
            num_classes,
            num_elements,
        }
    }

    /// Builds the shape from the runtime-reported dims, e.g. `[1, 84, 8400]`.
    pub fn from_dims(dims: &[usize]) -> Result<Self> {
        let (channels, elements) = match dims {
            [1, c, e] => (*c, *e),
            [b, _, _] => bail!("Unsupported batch size {} in output shape {:?}, expected 1", b, dims),
            _ => bail!("Output shape {:?} is not of the form [1, C, E]", dims),
        };
        ensure!(
            channels > BOX_CHANNELS,
            "Output shape {:?} has {} channels, needs at least {} (box + one class)",
            dims, channels, BOX_CHANNELS + 1
        );
        ensure!(elements >= 1, "Output shape {:?} has no anchor elements", dims);
        ensure!(
            channels.checked_mul(elements).is_some(),
            "Output shape {:?} is too large", dims
        );

        Ok(Self::new(channels - BOX_CHANNELS, elements))
    }

    pub fn channels(&self) -> usize {
        self.num_classes + BOX_CHANNELS
    }

    /// Expected length of the flat tensor buffer, `None` if it overflows.
    pub fn checked_len(&self) -> Option<usize> {
        self.num_classes
            .checked_add(BOX_CHANNELS)?
            .checked_mul(self.num_elements)
    }

    /// Expected length of the flat tensor buffer. Saturates on overflow.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// False while either dimension is still unset.
    pub fn is_ready(&self) -> bool {
        self.num_classes > 0 && self.num_elements > 0
    }

    pub fn dims(&self) -> [usize; 3] {
        [1, self.channels(), self.num_elements]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_runtime_dims() {
        let shape = OutputShape::from_dims(&[1, 84, 8400]).unwrap();
        assert_eq!(shape.num_classes, 80);
        assert_eq!(shape.num_elements, 8400);
        assert_eq!(shape.channels(), 84);
        assert_eq!(shape.len(), 84 * 8400);
        assert_eq!(shape.dims(), [1, 84, 8400]);
    }

    #[test]
    fn rejects_structurally_invalid_dims() {
        assert!(OutputShape::from_dims(&[1, 4, 10]).is_err());
        assert!(OutputShape::from_dims(&[1, 5, 0]).is_err());
        assert!(OutputShape::from_dims(&[2, 84, 8400]).is_err());
        assert!(OutputShape::from_dims(&[84, 8400]).is_err());
        assert!(OutputShape::from_dims(&[1, 84, usize::MAX / 2]).is_err());
    }

    #[test]
    fn oversized_shape_has_no_checked_len() {
        let shape = OutputShape::new(1, usize::MAX / 2);
        assert_eq!(shape.checked_len(), None);
        assert_eq!(shape.len(), usize::MAX);
        assert_eq!(OutputShape::new(usize::MAX, 1).checked_len(), None);
    }

    #[test]
    fn unset_shape_is_not_ready() {
        assert!(!OutputShape::default().is_ready());
        assert!(!OutputShape::new(3, 0).is_ready());
        assert!(OutputShape::new(1, 1).is_ready());
    }
}
