use ndarray::Array2;
use std::borrow::Cow;

use crate::error::{BuildError, BuildResult};
use crate::geometry;
use crate::Point2d;

/// 单张 CT 切片上的一条结节轮廓.
///
/// 点坐标以像素索引为单位 `(x, y)`, `z_position` 为该切片的物理位置 (mm).
/// `inclusion` 为 `true` 表示该轮廓圈定结节组织, 为 `false` 表示挖去一个空洞.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contour {
    points: Vec<Point2d>,
    z_position: f64,
    inclusion: bool,
    source_id: String,
}

impl Contour {
    /// 构造轮廓. `source_id` 用于关联其所在的原始切片.
    ///
    /// # 返回值
    ///
    /// - 当 `points` 为空时, 返回 `Err(BuildError::EmptyContour)`;
    /// - 当任意坐标 (含 `z_position`) 为 inf 或 NaN 时, 返回
    ///   `Err(BuildError::NonFiniteCoordinate)`;
    /// - 其他情况下成功. 只有一个点的退化轮廓是合法的.
    pub fn new(
        points: Vec<Point2d>,
        z_position: f64,
        inclusion: bool,
        source_id: impl Into<String>,
    ) -> BuildResult<Self> {
        if points.is_empty() {
            return Err(BuildError::EmptyContour);
        }
        if let Some(&(x, y)) = points
            .iter()
            .find(|(x, y)| !(x.is_finite() && y.is_finite() && z_position.is_finite()))
        {
            return Err(BuildError::NonFiniteCoordinate(x, y, z_position));
        }
        Ok(Self {
            points,
            z_position,
            inclusion,
            source_id: source_id.into(),
        })
    }

    /// 轮廓顶点 (像素坐标).
    #[inline]
    pub fn points(&self) -> &[Point2d] {
        &self.points
    }

    /// 顶点个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 恒为 `false`, 构造时已保证至少一个顶点.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 切片物理位置 (mm).
    #[inline]
    pub fn z_position(&self) -> f64 {
        self.z_position
    }

    /// 是否为 inclusion 轮廓.
    #[inline]
    pub fn is_inclusion(&self) -> bool {
        self.inclusion
    }

    /// 是否为 exclusion (空洞) 轮廓.
    #[inline]
    pub fn is_exclusion(&self) -> bool {
        !self.inclusion
    }

    /// 原始切片标识.
    #[inline]
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// 少于两个点的轮廓没有直径.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.points.len() < 2
    }

    /// 闭合后的顶点序列.
    #[inline]
    pub fn closed_points(&self) -> Cow<'_, [Point2d]> {
        geometry::close_polygon(&self.points)
    }

    /// 按像素间距 `spacing` 将顶点换算为毫米坐标.
    pub fn scaled_points(&self, spacing: f64) -> Vec<Point2d> {
        self.points
            .iter()
            .map(|&(x, y)| (x * spacing, y * spacing))
            .collect()
    }

    /// 以 `N x 3` 矩阵形式返回顶点, 每行为 `(x, y, z_position)`.
    /// 前两列为像素坐标, 最后一列为物理位置.
    pub fn to_matrix(&self) -> Array2<f64> {
        let mut m = Array2::<f64>::zeros((self.points.len(), 3));
        for (mut row, &(x, y)) in m.rows_mut().into_iter().zip(self.points.iter()) {
            row[0] = x;
            row[1] = y;
            row[2] = self.z_position;
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contour_init_err() {
        let e = Contour::new(vec![], 0.0, true, "a").unwrap_err();
        assert_eq!(e, BuildError::EmptyContour);

        let e = Contour::new(vec![(0.0, f64::NAN)], 0.0, true, "a").unwrap_err();
        assert!(matches!(e, BuildError::NonFiniteCoordinate(..)));

        let e = Contour::new(vec![(0.0, 0.0)], f64::INFINITY, true, "a").unwrap_err();
        assert!(matches!(e, BuildError::NonFiniteCoordinate(..)));
    }

    #[test]
    fn test_contour_matrix() {
        let c = Contour::new(vec![(1.0, 2.0), (3.0, 4.0)], -7.5, false, "img-3").unwrap();
        assert!(c.is_exclusion());
        assert!(!c.is_degenerate());
        assert_eq!(c.source_id(), "img-3");

        let m = c.to_matrix();
        assert_eq!(m.dim(), (2, 3));
        assert_eq!(m.row(1).to_vec(), vec![3.0, 4.0, -7.5]);
        assert_eq!(c.scaled_points(0.5), vec![(0.5, 1.0), (1.5, 2.0)]);
    }

    #[test]
    fn test_single_point_contour() {
        let c = Contour::new(vec![(5.0, 5.0)], 1.0, true, "x").unwrap();
        assert!(c.is_degenerate());
        assert_eq!(c.closed_points().len(), 1);
    }
}
