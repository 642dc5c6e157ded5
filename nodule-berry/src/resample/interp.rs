//! 三维规则网格上的三线性插值.
//!
//! 网格各轴的坐标只要求严格递增, 不要求等间距 (CT 的 z 方向常常不等间距).

use ndarray::{Array3, ArrayView3, ArrayViewMut2, Axis};

/// 三线性网格插值器.
#[derive(Debug, Clone)]
pub struct GridInterpolator<'a> {
    axes: [&'a [f64]; 3],
    values: ArrayView3<'a, f64>,
}

/// 某一轴上的插值位置: 左右两个格点索引及右侧权重.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Bracket {
    lo: usize,
    hi: usize,
    t: f64,
}

/// 与格点的距离小于 `SNAP_EPS * 格宽` 时, 视为落在格点上.
const SNAP_EPS: f64 = 1e-9;

/// 在严格递增的坐标序列 `axis` 上定位 `v`. 超出范围的 `v` 被截断到端点.
///
/// 由不同算式得到的同一坐标可能相差若干 ulp, 这类点的权重被吸附为 0 或 1.
fn bracket(axis: &[f64], v: f64) -> Bracket {
    let n = axis.len();
    if n == 1 {
        return Bracket { lo: 0, hi: 0, t: 0.0 };
    }
    let v = v.clamp(axis[0], axis[n - 1]);
    let lo = axis.partition_point(|x| *x <= v).saturating_sub(1).min(n - 2);
    let width = axis[lo + 1] - axis[lo];
    let t = match (v - axis[lo]) / width {
        t if t <= SNAP_EPS => 0.0,
        t if t >= 1.0 - SNAP_EPS => 1.0,
        t => t,
    };
    Bracket { lo, hi: lo + 1, t }
}

impl<'a> GridInterpolator<'a> {
    /// 由三个轴的坐标和网格值构造.
    ///
    /// # 返回值
    ///
    /// 任一轴为空, 长度与 `values` 对应维度不一致, 或坐标不严格递增时, 返回 `None`.
    pub fn new(axes: [&'a [f64]; 3], values: ArrayView3<'a, f64>) -> Option<Self> {
        let shape = values.shape();
        for (axis, &n) in axes.iter().zip(shape) {
            if axis.is_empty() || axis.len() != n {
                return None;
            }
            if axis.windows(2).any(|w| !(w[0] < w[1])) {
                return None;
            }
        }
        Some(Self { axes, values })
    }

    /// 在点 `p` 处插值. 超出网格范围的坐标被截断到网格边界.
    pub fn at(&self, p: [f64; 3]) -> f64 {
        let [b0, b1, b2] = [0, 1, 2].map(|i| bracket(self.axes[i], p[i]));
        let mut acc = 0.0;
        for (i, wi) in [(b0.lo, 1.0 - b0.t), (b0.hi, b0.t)] {
            for (j, wj) in [(b1.lo, 1.0 - b1.t), (b1.hi, b1.t)] {
                for (k, wk) in [(b2.lo, 1.0 - b2.t), (b2.hi, b2.t)] {
                    let w = wi * wj * wk;
                    if w != 0.0 {
                        acc += w * self.values[(i, j, k)];
                    }
                }
            }
        }
        acc
    }

    /// 以轴 0 坐标 `x` 填充一层采样结果.
    fn fill_layer(&self, x: f64, grid: [&[f64]; 3], mut layer: ArrayViewMut2<f64>) {
        for ((j, k), v) in layer.indexed_iter_mut() {
            *v = self.at([x, grid[1][j], grid[2][k]]);
        }
    }

    /// 在新网格 `grid` (三个轴的坐标) 的所有格点上插值.
    pub fn sample(&self, grid: [&[f64]; 3]) -> Array3<f64> {
        let mut out = Array3::zeros((grid[0].len(), grid[1].len(), grid[2].len()));
        out.axis_iter_mut(Axis(0))
            .zip(grid[0])
            .for_each(|(layer, &x)| self.fill_layer(x, grid, layer));
        out
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};

        /// 并发操作部分
        impl GridInterpolator<'_> {
            /// 借助 `rayon`, 按轴 0 分层并行地在新网格上插值. 结果与 [`Self::sample`] 一致.
            pub fn par_sample(&self, grid: [&[f64]; 3]) -> Array3<f64> {
                let mut out = Array3::zeros((grid[0].len(), grid[1].len(), grid[2].len()));
                out.axis_iter_mut(Axis(0))
                    .into_par_iter()
                    .enumerate()
                    .for_each(|(i, layer)| self.fill_layer(grid[0][i], grid, layer));
                out
            }
        }
    }
}
