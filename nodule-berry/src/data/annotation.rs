use itertools::Itertools;
use ndarray::{concatenate, Array2, Axis};

use super::{Characteristics, Contour, ScanGeometry};
use crate::error::{BuildError, BuildResult};

/// 单个医师对单个结节的一次完整标注.
///
/// 标注拥有其全部轮廓, 但不拥有所属扫描: 只保存扫描 id 和几何信息快照.
/// 构造完成后不可变. 包围盒, 掩膜等派生量每次按需计算, 不做缓存.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Annotation {
    id: u64,
    scan_id: u64,
    geometry: ScanGeometry,
    contours: Vec<Contour>,
    characteristics: Option<Characteristics>,
}

impl Annotation {
    /// 构造标注. `contours` 至少包含一条轮廓, 否则返回 `Err(BuildError::EmptyAnnotation)`.
    pub fn new(
        id: u64,
        scan_id: u64,
        geometry: ScanGeometry,
        contours: Vec<Contour>,
    ) -> BuildResult<Self> {
        if contours.is_empty() {
            return Err(BuildError::EmptyAnnotation);
        }
        Ok(Self {
            id,
            scan_id,
            geometry,
            contours,
            characteristics: None,
        })
    }

    /// 构造期附加医师特征评分.
    #[inline]
    pub fn with_characteristics(mut self, characteristics: Characteristics) -> Self {
        self.characteristics = Some(characteristics);
        self
    }

    /// 标注 id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// 所属扫描 id.
    #[inline]
    pub fn scan_id(&self) -> u64 {
        self.scan_id
    }

    /// 所属扫描的几何信息.
    #[inline]
    pub fn geometry(&self) -> &ScanGeometry {
        &self.geometry
    }

    /// 全部轮廓, 保持输入顺序.
    #[inline]
    pub fn contours(&self) -> &[Contour] {
        &self.contours
    }

    /// 医师特征评分 (若有).
    #[inline]
    pub fn characteristics(&self) -> Option<&Characteristics> {
        self.characteristics.as_ref()
    }

    /// 所有轮廓中出现过的 z 位置, 去重并升序排列.
    pub fn distinct_z_positions(&self) -> Vec<f64> {
        self.contours
            .iter()
            .map(Contour::z_position)
            .sorted_by(f64::total_cmp)
            .dedup()
            .collect()
    }

    /// 将所有轮廓顶点堆叠为 `N x 3` 矩阵. 前两列为像素坐标, 第三列为 z 物理位置,
    /// 因此前两列不含像素间距信息.
    pub fn contours_to_matrix(&self) -> Array2<f64> {
        let parts: Vec<Array2<f64>> = self.contours.iter().map(Contour::to_matrix).collect();
        let views: Vec<_> = parts.iter().map(Array2::view).collect();
        // 所有分块均为 3 列且至少一块, 该操作不会生成 `Err`, 可直接 unwrap.
        concatenate(Axis(0), &views).unwrap()
    }
}
