//! 标注与扫描的基础数据结构.
//!
//! 所有结构在构造完成后不可变, 不提供任何修改器.

mod annotation;
mod characteristics;
mod contour;
mod scan;

pub use annotation::Annotation;
pub use characteristics::Characteristics;
pub use contour::Contour;
pub use scan::{BoxError, ImageStack, ScanGeometry, ScanImage};
