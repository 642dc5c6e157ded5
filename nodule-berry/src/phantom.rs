//! 合成数据. 生成已知解析体积的球形结节标注, 以及与之对应的 CT 影像栈.
//!
//! 用于单元测试和消融实验, 不依赖任何真实数据.

use ndarray::Array2;
use std::f64::consts::PI;

use crate::consts::FRAME_SIZE;
use crate::{Annotation, Contour, Idx2d, Point2d, ScanGeometry, ScanImage};

/// 球内体素的 HU 值.
pub const NODULE_HU: f32 = 60.0;

/// 球外体素的 HU 值 (肺实质).
pub const LUNG_HU: f32 = -800.0;

/// 以 `center` 为圆心, `radius` 为半径 (像素), 逆时针均匀采样 `vertices` 个顶点.
pub fn circle_points(center: Point2d, radius: f64, vertices: usize) -> Vec<Point2d> {
    let (cx, cy) = center;
    (0..vertices)
        .map(|i| {
            let t = 2.0 * PI * i as f64 / vertices as f64;
            (cx + radius * t.cos(), cy + radius * t.sin())
        })
        .collect()
}

/// 轴对齐矩形的四个顶点 (逆时针, 不闭合).
pub fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Vec<Point2d> {
    vec![(x0, y0), (x1, y0), (x1, y1), (x0, y1)]
}

/// 由逐像素函数生成影像栈. `f(k, row, column)` 给出第 `k` 张切片的 HU 值.
/// 切片标识为 `"slice-{k}"`.
pub fn stack_from_fn<F>(frame: Idx2d, z_positions: &[f64], f: F) -> Vec<ScanImage>
where
    F: Fn(usize, usize, usize) -> f32,
{
    z_positions
        .iter()
        .enumerate()
        .map(|(k, &z)| {
            let pixels = Array2::from_shape_fn(frame, |(r, c)| f(k, r, c));
            ScanImage::new(format!("slice-{k}"), z, pixels)
        })
        .collect()
}

/// 球形结节模型.
///
/// 默认球心位于 `512 x 512` 切片中央, `z = 0`; 像素间距 0.7 mm,
/// 层间距与层厚均为 1.25 mm; 每条轮廓 64 个顶点.
#[derive(Clone, Debug)]
pub struct SpherePhantom {
    radius_mm: f64,
    center: Point2d,
    center_z: f64,
    pixel_spacing: f64,
    slice_spacing: f64,
    vertices: usize,
    snap: bool,
}

impl SpherePhantom {
    /// 以半径 `radius_mm` (mm) 构造. 半径必须为有限正数, 否则程序 panic.
    pub fn new(radius_mm: f64) -> Self {
        assert!(radius_mm.is_finite() && radius_mm > 0.0);
        Self {
            radius_mm,
            center: (FRAME_SIZE as f64 / 2.0, FRAME_SIZE as f64 / 2.0),
            center_z: 0.0,
            pixel_spacing: 0.7,
            slice_spacing: 1.25,
            vertices: 64,
            snap: false,
        }
    }

    /// 设置球心的像素坐标 `(x, y)`.
    pub fn with_center(mut self, center: Point2d) -> Self {
        self.center = center;
        self
    }

    /// 设置球心的 z 物理位置.
    pub fn with_center_z(mut self, z: f64) -> Self {
        self.center_z = z;
        self
    }

    /// 设置像素间距. 必须为有限正数, 否则程序 panic.
    pub fn with_pixel_spacing(mut self, spacing: f64) -> Self {
        assert!(spacing.is_finite() && spacing > 0.0);
        self.pixel_spacing = spacing;
        self
    }

    /// 设置层间距 (同时作为扫描层厚). 必须为有限正数, 否则程序 panic.
    pub fn with_slice_spacing(mut self, spacing: f64) -> Self {
        assert!(spacing.is_finite() && spacing > 0.0);
        self.slice_spacing = spacing;
        self
    }

    /// 设置每条轮廓的顶点数. 至少为 3, 否则程序 panic.
    pub fn with_vertices(mut self, vertices: usize) -> Self {
        assert!(vertices >= 3);
        self.vertices = vertices;
        self
    }

    /// 将轮廓顶点取整到像素格点, 模拟真实标注工具的输出.
    pub fn snapped(mut self) -> Self {
        self.snap = true;
        self
    }

    /// 半径 (mm).
    #[inline]
    pub fn radius_mm(&self) -> f64 {
        self.radius_mm
    }

    /// 对应的扫描几何信息.
    pub fn geometry(&self) -> ScanGeometry {
        // 两个参数在构造与设置时均已校验, 不会出错.
        ScanGeometry::new(self.pixel_spacing, self.slice_spacing).unwrap()
    }

    /// 解析体积 `4/3 π r³` (mm³).
    #[inline]
    pub fn analytic_volume(&self) -> f64 {
        4.0 / 3.0 * PI * self.radius_mm.powi(3)
    }

    /// 与球相交 (截面半径大于 0) 的切片 z 位置, 升序.
    pub fn slice_positions(&self) -> Vec<f64> {
        let mut n = (self.radius_mm / self.slice_spacing).floor() as i64;
        if n as f64 * self.slice_spacing >= self.radius_mm {
            n -= 1;
        }
        (-n..=n)
            .map(|k| self.center_z + k as f64 * self.slice_spacing)
            .collect()
    }

    /// `z` 处截面的轮廓顶点 (像素).
    fn section(&self, z: f64) -> Vec<Point2d> {
        let dz = z - self.center_z;
        let r_px = (self.radius_mm * self.radius_mm - dz * dz).max(0.0).sqrt() / self.pixel_spacing;
        let mut pts = circle_points(self.center, r_px, self.vertices);
        if self.snap {
            pts.iter_mut().for_each(|p| *p = (p.0.round(), p.1.round()));
            pts.dedup();
        }
        pts
    }

    /// 生成 id 为 `id` 的标注, 每个相交切片一条 inclusion 轮廓.
    /// 轮廓的切片标识由 z 位置决定, 与 [`Self::image_stack`] 生成的切片一致.
    pub fn annotation(&self, id: u64) -> Annotation {
        let contours = self
            .slice_positions()
            .into_iter()
            .map(|z| {
                // 顶点来自有限值的三角函数, 数量不少于 1.
                Contour::new(self.section(z), z, true, slice_id(z)).unwrap()
            })
            .collect();
        // 半径为正时至少有 z = center_z 这一层.
        Annotation::new(id, 0, self.geometry(), contours).unwrap()
    }

    /// 生成覆盖球体的影像栈: 在相交切片上下各多出 `margin` 层.
    /// 体素中心到球心的距离小于半径时取 [`NODULE_HU`], 否则取 [`LUNG_HU`].
    pub fn image_stack(&self, frame: Idx2d, margin: usize) -> Vec<ScanImage> {
        let positions = self.slice_positions();
        let z0 = positions[0] - margin as f64 * self.slice_spacing;
        let (cx, cy) = self.center;
        let r2 = self.radius_mm * self.radius_mm;
        (0..positions.len() + 2 * margin)
            .map(|k| {
                let z = z0 + k as f64 * self.slice_spacing;
                let dz = z - self.center_z;
                let pixels = Array2::from_shape_fn(frame, |(r, c)| {
                    let dx = (c as f64 - cx) * self.pixel_spacing;
                    let dy = (r as f64 - cy) * self.pixel_spacing;
                    if dx * dx + dy * dy + dz * dz < r2 {
                        NODULE_HU
                    } else {
                        LUNG_HU
                    }
                });
                ScanImage::new(slice_id(z), z, pixels)
            })
            .collect()
    }
}

/// 按 z 位置生成切片标识, 精确到微米.
fn slice_id(z: f64) -> String {
    format!("z{z:+.3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_positions() {
        let s = SpherePhantom::new(2.5).with_slice_spacing(1.25);
        // z = ±2.5 处截面半径为 0, 不计入.
        assert_eq!(s.slice_positions(), vec![-1.25, 0.0, 1.25]);

        let s = SpherePhantom::new(2.6).with_slice_spacing(1.25).with_center_z(10.0);
        assert_eq!(s.slice_positions(), vec![7.5, 8.75, 10.0, 11.25, 12.5]);
    }

    #[test]
    fn test_annotation_layout() {
        let s = SpherePhantom::new(5.0).with_vertices(16);
        let ann = s.annotation(7);
        assert_eq!(ann.id(), 7);
        assert_eq!(ann.contours().len(), s.slice_positions().len());
        assert!(ann.contours().iter().all(|c| c.len() == 16 && c.is_inclusion()));
        assert_eq!(ann.contours()[0].source_id(), "z-3.750");

        let stack = s.image_stack((8, 8), 1);
        assert_eq!(stack[1].source_id(), ann.contours()[0].source_id());
    }

    #[test]
    fn test_shoelace_close_to_analytic() {
        let s = SpherePhantom::new(10.0).with_slice_spacing(1.0).with_pixel_spacing(0.5);
        let v = s.annotation(1).estimate_volume();
        let rel = (v - s.analytic_volume()).abs() / s.analytic_volume();
        assert!(rel < 0.03, "relative error {rel}");
    }

    #[test]
    fn test_image_stack() {
        let s = SpherePhantom::new(3.0).with_center((16.0, 16.0));
        let stack = s.image_stack((32, 32), 2);
        assert_eq!(stack.len(), s.slice_positions().len() + 4);
        assert_eq!(stack[0].frame_shape(), (32, 32));
        assert_eq!(stack[2].z_position(), s.slice_positions()[0]);

        let mid = &stack[stack.len() / 2];
        assert_eq!(mid.z_position(), 0.0);
        assert_eq!(mid.pixels()[(16, 16)], NODULE_HU);
        assert_eq!(mid.pixels()[(0, 0)], LUNG_HU);
        assert!(stack[0].pixels().iter().all(|v| *v == LUNG_HU));
    }
}
