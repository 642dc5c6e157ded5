//! 平面几何基础算子.
//!
//! 均为无状态纯函数, 输入是显式的顶点数组和查询点数组,
//! 与任何绘图 / GUI 库无关.

use itertools::{Itertools, MinMaxResult};
use ndarray::Array2;
use std::borrow::Cow;

use crate::Point2d;

/// 判断点 `(px, py)` 是否位于多边形 `polygon` 内部 (射线法).
///
/// 多边形首尾是否相连均可, 函数内部视其为闭合. 退化多边形
/// (少于 3 个顶点) 不包含任何点.
///
/// # 注意
///
/// 1. `polygon` 不能为空, 否则程序 panic.
/// 2. 恰好位于边上的点的归属由半开规则决定 (左/下边界包含, 右/上边界不包含),
///   但对同一输入总是稳定的.
pub fn contains_point(polygon: &[Point2d], (px, py): Point2d) -> bool {
    assert!(!polygon.is_empty(), "多边形至少需要一个顶点");

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for (i, &(xi, yi)) in polygon.iter().enumerate() {
        let (xj, yj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// 对 `points` 中的每个点运行 [`contains_point`]. 返回值与 `points` 一一对应.
pub fn contains_points(polygon: &[Point2d], points: &[Point2d]) -> Vec<bool> {
    points.iter().map(|&p| contains_point(polygon, p)).collect()
}

/// 鞋带公式 (格林公式) 计算多边形面积, 结果非负.
///
/// 少于 3 个顶点时面积为 0.
pub fn polygon_area(polygon: &[Point2d]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    // 每个顶点与其前一个顶点 (循环) 配对.
    let prev = polygon.iter().cycle().skip(polygon.len() - 1);
    let twice: f64 = polygon
        .iter()
        .zip(prev)
        .map(|(&(x, y), &(xp, yp))| x * yp - y * xp)
        .sum();
    0.5 * twice.abs()
}

/// 两点之间的欧氏距离.
#[inline]
pub fn distance((x1, y1): Point2d, (x2, y2): Point2d) -> f64 {
    (x1 - x2).hypot(y1 - y2)
}

/// 计算两两距离矩阵. 返回值 `d` 满足 `d[(i, j)] == |points[i] - points[j]|`.
pub fn pairwise_distances(points: &[Point2d]) -> Array2<f64> {
    let n = points.len();
    let mut d = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        for j in (i + 1)..n {
            let v = distance(points[i], points[j]);
            d[(i, j)] = v;
            d[(j, i)] = v;
        }
    }
    d
}

/// 按行优先顺序找到矩阵最大值第一次出现的位置. 空矩阵返回 `None`.
pub fn argmax_first(m: &Array2<f64>) -> Option<((usize, usize), f64)> {
    let mut best: Option<((usize, usize), f64)> = None;
    for (pos, &v) in m.indexed_iter() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((pos, v)),
        }
    }
    best
}

/// 若多边形首尾顶点不同, 则在末尾追加首顶点使其闭合; 否则原样借出.
pub fn close_polygon(polygon: &[Point2d]) -> Cow<'_, [Point2d]> {
    match (polygon.first(), polygon.last()) {
        (Some(first), Some(last)) if first != last => {
            let mut v = Vec::with_capacity(polygon.len() + 1);
            v.extend_from_slice(polygon);
            v.push(*first);
            Cow::Owned(v)
        }
        _ => Cow::Borrowed(polygon),
    }
}

/// 计算点集的二维轴对齐包围盒 `[[x_min, x_max], [y_min, y_max]]`. 空点集返回 `None`.
pub fn bounds_2d(points: &[Point2d]) -> Option<[[f64; 2]; 2]> {
    let x = min_max(points.iter().map(|p| p.0))?;
    let y = min_max(points.iter().map(|p| p.1))?;
    Some([x, y])
}

/// 浮点序列的 `[min, max]`. 空序列返回 `None`.
pub(crate) fn min_max<I: IntoIterator<Item = f64>>(it: I) -> Option<[f64; 2]> {
    match it.into_iter().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => None,
        MinMaxResult::OneElement(v) => Some([v, v]),
        MinMaxResult::MinMax(lo, hi) => Some([lo, hi]),
    }
}

/// 在 `values` 中找到与 `v` 绝对差最小的元素索引. 并列时取第一个.
///
/// `values` 不能为空, 否则程序 panic.
pub fn nearest_index(values: &[f64], v: f64) -> usize {
    assert!(!values.is_empty());
    values
        .iter()
        .map(|x| (x - v).abs())
        .enumerate()
        .fold((0, f64::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best })
        .0
}
