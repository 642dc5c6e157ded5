//! 🍇欢迎光临🍓
//!
//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{Idx2d, Idx3d, Point2d};

pub use crate::{Annotation, Characteristics, Contour, ImageStack, ScanGeometry, ScanImage};

pub use crate::error::{BuildError, BuildResult, VolumeAxis, VolumeError, VolumeResult};

pub use crate::mask::BoolMask;
pub use crate::measure::{measure_all, BoundingBox, Diameter, Measurements};
pub use crate::overlap::{agreement_matrix, Voxel, VoxelSet};
pub use crate::resample::{NoduleVolume, Padding, ResampleOptions};

pub use crate::navigator::SliceNavigator;
pub use crate::repository::{AnnotationRepository, MemoryRepository};

#[cfg(feature = "rayon")]
pub use crate::measure::par_measure_all;
