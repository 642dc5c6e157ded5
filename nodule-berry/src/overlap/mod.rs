//! 稀疏体素集合与标注一致性.
//!
//! 同一结节往往由多位医师分别标注. 将每个标注表示为占据体素的坐标集合后,
//! 标注之间的一致性可以直接用集合运算计算, 无需构造稠密网格.
//!
//! 所有集合共享同一全局坐标系: `x`, `y` 为绝对整数像素坐标, `z` 为物理位置 (mm).

use ndarray::Array2;
use ordered_float::OrderedFloat;
use std::collections::HashSet;

use crate::geometry::{bounds_2d, contains_point};
use crate::Annotation;

/// 全局坐标系下的一个体素.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Voxel {
    /// 列坐标 (像素).
    pub x: i64,
    /// 行坐标 (像素).
    pub y: i64,
    /// 切片物理位置 (mm).
    pub z: OrderedFloat<f64>,
}

impl Voxel {
    /// 构造体素.
    #[inline]
    pub fn new(x: i64, y: i64, z: f64) -> Self {
        Self {
            x,
            y,
            z: OrderedFloat(z),
        }
    }
}

/// 占据体素的稀疏集合.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoxelSet {
    inner: HashSet<Voxel>,
}

impl FromIterator<Voxel> for VoxelSet {
    fn from_iter<T: IntoIterator<Item = Voxel>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl VoxelSet {
    /// 体素个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// 是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// 是否包含体素 `v`.
    #[inline]
    pub fn contains(&self, v: &Voxel) -> bool {
        self.inner.contains(v)
    }

    /// 遍历所有体素. 顺序不确定.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.inner.iter()
    }

    /// 交集大小.
    pub fn intersection_len(&self, other: &Self) -> usize {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.inner.iter().filter(|v| large.inner.contains(v)).count()
    }

    /// 并集大小.
    #[inline]
    pub fn union_len(&self, other: &Self) -> usize {
        self.len() + other.len() - self.intersection_len(other)
    }

    /// Jaccard 系数 `|A ∩ B| / |A ∪ B|`. 两个空集的系数定义为 1.
    pub fn jaccard(&self, other: &Self) -> f64 {
        let union = self.union_len(other);
        if union == 0 {
            return 1.0;
        }
        self.intersection_len(other) as f64 / union as f64
    }

    /// Dice 系数 `2|A ∩ B| / (|A| + |B|)`. 两个空集的系数定义为 1.
    pub fn dice(&self, other: &Self) -> f64 {
        let total = self.len() + other.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * self.intersection_len(other) as f64 / total as f64
    }
}

/// 两两 Jaccard 系数矩阵. 对角线恒为 1.
pub fn agreement_matrix(sets: &[VoxelSet]) -> Array2<f64> {
    let n = sets.len();
    let mut m = Array2::<f64>::ones((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let v = sets[i].jaccard(&sets[j]);
            m[(i, j)] = v;
            m[(j, i)] = v;
        }
    }
    m
}

impl Annotation {
    /// 将标注表示为占据体素的稀疏集合.
    ///
    /// 每条轮廓只在其自身的局部包围盒 `floor(min)..=ceil(max)` 内枚举整数像素,
    /// 运行包含测试. inclusion 轮廓的结果并入 "包含" 集合, exclusion
    /// 轮廓的结果并入 "排除" 集合, 最终返回两者之差.
    ///
    /// # 注意
    ///
    /// 与 [`Annotation::as_boolean_mask`] 不同, 同层多条 inclusion 轮廓在这里取并集.
    /// 当各层只有一条 inclusion 轮廓且顶点均为整数像素时,
    /// 结果与 [`crate::mask::BoolMask::to_voxel_set`] 相同.
    pub fn as_voxel_set(&self) -> VoxelSet {
        let mut included = HashSet::new();
        let mut excluded = HashSet::new();

        for c in self.contours() {
            let polygon = c.closed_points();
            // 轮廓至少有一个点.
            let Some([[x0, x1], [y0, y1]]) = bounds_2d(&polygon) else {
                continue;
            };
            let target = if c.is_inclusion() {
                &mut included
            } else {
                &mut excluded
            };
            let (x0, x1) = (x0.floor() as i64, x1.ceil() as i64);
            let (y0, y1) = (y0.floor() as i64, y1.ceil() as i64);
            for (x, y) in itertools::iproduct!(x0..=x1, y0..=y1) {
                if contains_point(&polygon, (x as f64, y as f64)) {
                    target.insert(Voxel::new(x, y, c.z_position()));
                }
            }
        }

        included.retain(|v| !excluded.contains(v));
        VoxelSet { inner: included }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::{self, SpherePhantom};
    use crate::{Contour, ScanGeometry};

    fn f64_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn annotation(id: u64, contours: Vec<Contour>) -> Annotation {
        Annotation::new(id, 1, ScanGeometry::new(1.0, 1.0).unwrap(), contours).unwrap()
    }

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64, z: f64, inclusion: bool) -> Contour {
        Contour::new(phantom::rectangle(x0, y0, x1, y1), z, inclusion, "r").unwrap()
    }

    #[test]
    fn test_square_voxels() {
        // 射线法的半开规则: 左/下边界包含, 右/上边界不包含.
        let set = annotation(1, vec![rect(0.0, 0.0, 3.0, 3.0, 1.5, true)]).as_voxel_set();
        assert_eq!(set.len(), 9);
        assert!(set.contains(&Voxel::new(0, 0, 1.5)));
        assert!(set.contains(&Voxel::new(2, 2, 1.5)));
        assert!(!set.contains(&Voxel::new(3, 3, 1.5)));
    }

    #[test]
    fn test_exclusion_removed() {
        let set = annotation(
            1,
            vec![rect(0.0, 0.0, 10.0, 10.0, 0.0, true), rect(3.0, 3.0, 7.0, 7.0, 0.0, false)],
        )
        .as_voxel_set();
        assert_eq!(set.len(), 100 - 16);
        assert!(!set.contains(&Voxel::new(4, 4, 0.0)));
        assert!(set.contains(&Voxel::new(1, 1, 0.0)));
    }

    #[test]
    fn test_inclusions_union() {
        let set = annotation(
            1,
            vec![rect(0.0, 0.0, 2.0, 2.0, 0.0, true), rect(5.0, 5.0, 7.0, 7.0, 0.0, true)],
        )
        .as_voxel_set();
        assert_eq!(set.len(), 8);
    }

    #[test]
    fn test_jaccard_dice() {
        let a = annotation(1, vec![rect(0.0, 0.0, 4.0, 4.0, 0.0, true)]).as_voxel_set();
        let b = annotation(2, vec![rect(2.0, 0.0, 6.0, 4.0, 0.0, true)]).as_voxel_set();
        // |A| = |B| = 16, |A ∩ B| = 8.
        assert_eq!(a.intersection_len(&b), 8);
        assert_eq!(a.union_len(&b), 24);
        assert!(f64_eq(a.jaccard(&b), 8.0 / 24.0));
        assert!(f64_eq(a.dice(&b), 0.5));
        assert!(f64_eq(a.jaccard(&a), 1.0));

        let empty = VoxelSet::default();
        assert!(f64_eq(empty.jaccard(&empty), 1.0));
        assert!(f64_eq(empty.dice(&empty), 1.0));
        assert!(f64_eq(a.jaccard(&empty), 0.0));
    }

    #[test]
    fn test_agreement_matrix() {
        let sphere = SpherePhantom::new(6.0).snapped();
        let sets: Vec<VoxelSet> = [(256.0, 256.0), (257.0, 256.0), (300.0, 300.0)]
            .into_iter()
            .map(|center| sphere.clone().with_center(center).annotation(1).as_voxel_set())
            .collect();
        let m = agreement_matrix(&sets);
        assert_eq!(m.dim(), (3, 3));
        assert!((0..3).all(|i| m[(i, i)] == 1.0));
        assert_eq!(m[(0, 1)], m[(1, 0)]);
        assert!(m[(0, 1)] > 0.5 && m[(0, 1)] < 1.0);
        assert_eq!(m[(0, 2)], 0.0);
    }
}
