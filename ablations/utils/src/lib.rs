//! 消融实验依赖的通用组件.

use nodule_berry::phantom::SpherePhantom;
use std::io::{self, Write};

pub mod config;

const SEP: &str = "--------------------------------------------------------";

/// 向 `w` 写入一行分隔线.
#[inline]
pub fn sep_to<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{SEP}")
}

/// 获得可并行核心数.
pub fn cpus() -> usize {
    std::thread::available_parallelism().map_or_else(|_| num_cpus::get(), usize::from)
}

/// 创建实验用的球形结节: 球心偏离像素格点, 避免轮廓顶点恰好落在格点上.
#[inline]
pub fn off_grid_sphere(radius_mm: f64, (pixel_spacing, slice_spacing): (f64, f64)) -> SpherePhantom {
    SpherePhantom::new(radius_mm)
        .with_center((255.37, 256.81))
        .with_center_z(0.4)
        .with_pixel_spacing(pixel_spacing)
        .with_slice_spacing(slice_spacing)
}
