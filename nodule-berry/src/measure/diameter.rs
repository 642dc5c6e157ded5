//! 最大轴向直径.

use log::trace;

use crate::geometry::{argmax_first, pairwise_distances};
use crate::{Annotation, Idx2d};

/// 最大轴向直径及其出现位置.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diameter {
    /// 直径 (mm).
    pub mm: f64,

    /// 最大值所在轮廓在 [`Annotation::contours`] 中的索引.
    pub contour: usize,

    /// 构成直径的两个顶点在该轮廓中的索引.
    pub endpoints: Idx2d,
}

impl Annotation {
    /// 基于轮廓估计最大轴向 (单层平面内) 直径.
    ///
    /// 对每条轮廓, 将顶点按像素间距换算为毫米坐标, 计算两两距离矩阵并取最大值;
    /// 再在所有轮廓间取最大值. 轮廓间比较使用严格大于, 并列时先出现的轮廓胜出.
    ///
    /// # 注意
    ///
    /// 1. 只有一个点的轮廓会被跳过.
    /// 2. 不检测直径穿出结节边界或穿过内部空洞的情况.
    ///
    /// # 返回值
    ///
    /// 若所有轮廓都只有一个点, 返回 `None`.
    pub fn estimate_diameter(&self) -> Option<Diameter> {
        let spacing = self.geometry().pixel_spacing();
        let mut best: Option<Diameter> = None;

        for (index, contour) in self.contours().iter().enumerate() {
            if contour.is_degenerate() {
                trace!("annotation {}: skip single-point contour {index}", self.id());
                continue;
            }
            let distances = pairwise_distances(&contour.scaled_points(spacing));
            let Some((endpoints, mm)) = argmax_first(&distances) else {
                continue;
            };
            if best.map_or(true, |b| mm > b.mm) {
                best = Some(Diameter {
                    mm,
                    contour: index,
                    endpoints,
                });
            }
        }
        best
    }
}
