//! 基于鞋带公式的体积估计.

use crate::geometry::{nearest_index, polygon_area};
use crate::Annotation;

/// 在升序 z 序列两端各补一个虚拟层, 与相邻层间距对称.
/// 这样首末层也能得到 "半层厚 + 半层厚" 的厚度, 而不是 0.
///
/// 少于两个不同 z 值时无法推断层间距, 返回 `None`.
fn extend_z(zs: &[f64]) -> Option<Vec<f64>> {
    let &[first, second, ..] = zs else {
        return None;
    };
    let &[.., second_last, last] = zs else {
        unreachable!()
    };
    let mut ext = Vec::with_capacity(zs.len() + 2);
    ext.push(first - (second - first));
    ext.extend_from_slice(zs);
    ext.push(last + (last - second_last));
    Some(ext)
}

/// 位于 `z` 的切片的厚度: 其在扩展序列中前后两个 z 值跨度的一半.
fn thickness_at(extended: &[f64], z: f64) -> f64 {
    debug_assert!(extended.len() >= 4);
    let j = nearest_index(extended, z).clamp(1, extended.len() - 2);
    0.5 * (extended[j + 1] - extended[j - 1])
}

/// 计算升序、去重的 z 序列中每个切片的厚度. 少于两个切片时全部取 `fallback`.
pub(crate) fn slice_thicknesses(zs: &[f64], fallback: f64) -> Vec<f64> {
    match extend_z(zs) {
        Some(ext) => zs.iter().map(|&z| thickness_at(&ext, z)).collect(),
        None => vec![fallback; zs.len()],
    }
}

impl Annotation {
    /// 基于轮廓估计结节体积 (mm³).
    ///
    /// 每条轮廓先用鞋带公式计算面积, 再乘以其所在切片的厚度;
    /// inclusion 轮廓计入正值, exclusion 轮廓计入负值.
    /// 同一 z 上的多条轮廓各自独立计算, 不预先合并.
    ///
    /// 切片厚度为该切片与上下相邻切片中点之间的距离. 首末切片使用对称补出的虚拟层.
    /// 若标注只有一条轮廓, 或所有轮廓位于同一 z 上, 则使用扫描层厚.
    ///
    /// # 注意
    ///
    /// 仅当输入在拓扑上暗示 exclusion 面积大于 inclusion 面积时结果才可能为负,
    /// 这说明上游数据有误.
    pub fn estimate_volume(&self) -> f64 {
        let geometry = self.geometry();
        let extended = if self.contours().len() == 1 {
            None
        } else {
            extend_z(&self.distinct_z_positions())
        };

        self.contours()
            .iter()
            .map(|c| {
                let area = polygon_area(&c.scaled_points(geometry.pixel_spacing()));
                let thickness = match &extended {
                    Some(ext) => thickness_at(ext, c.z_position()),
                    None => geometry.slice_thickness(),
                };
                let sign = if c.is_inclusion() { 1.0 } else { -1.0 };
                sign * area * thickness
            })
            .sum()
    }
}
