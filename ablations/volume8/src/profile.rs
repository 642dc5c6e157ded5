//! 估计器运行统计.

use std::time::{Duration, Instant};

/// ablation/benchmark 计时器.
///
/// 该计时器支持 "中途中断" 与 "结束中断, 继续开始计时".
#[derive(Clone, Debug)]
struct AccTimer {
    consumed: Duration,
    since: Instant,
}

impl AccTimer {
    /// 初始化计时器. 初始化时会视为已经开始计时.
    #[inline]
    fn new() -> Self {
        Self {
            consumed: Duration::ZERO,
            since: Instant::now(),
        }
    }

    /// 开始计时.
    #[inline]
    fn start(&mut self) {
        self.since = Instant::now();
    }

    /// 结束计时, 并将这一区间的时间累加. 返回本轮计时时长.
    ///
    /// # 注意
    ///
    /// 上一次调用必须是 `self.start()`, 否则计算时间值无意义.
    #[inline]
    fn elapsed(&mut self) -> Duration {
        let d = self.since.elapsed();
        self.consumed += d;
        d
    }
}

/// 一次实验用例: 球半径与扫描几何.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Case {
    /// 球半径 (mm).
    pub radius_mm: f64,
    /// 像素间距 (mm).
    pub pixel_spacing: f64,
    /// 层间距 (mm).
    pub slice_spacing: f64,
}

/// 单个体积估计器的统计: 相对解析体积的误差与耗时.
#[derive(Clone, Debug)]
pub struct Profile {
    cases: u64,

    /// 相对误差 `|估计 - 解析| / 解析` 之和.
    rel_err_sum: f64,

    /// 相对误差最大的用例.
    worst: Option<(f64, Case)>,

    time: AccTimer,

    /// 最耗时的一次估计.
    most: Option<Duration>,
}

impl Profile {
    /// 初始化.
    #[inline]
    pub fn new() -> Self {
        Self {
            cases: 0,
            rel_err_sum: 0.0,
            worst: None,
            time: AccTimer::new(),
            most: None,
        }
    }

    /// 开始一次估计计时.
    #[inline]
    pub fn start(&mut self) {
        self.time.start();
    }

    /// 结束计时并记录一次估计结果. 返回相对误差.
    pub fn record(&mut self, case: Case, estimate: f64, analytic: f64) -> f64 {
        let d = self.time.elapsed();
        self.most = Some(self.most.map_or(d, |m| m.max(d)));

        let rel = (estimate - analytic).abs() / analytic;
        self.cases += 1;
        self.rel_err_sum += rel;
        if self.worst.map_or(true, |(w, _)| rel > w) {
            self.worst = Some((rel, case));
        }
        rel
    }

    /// 合并另一线程的统计.
    pub fn merge(mut self, other: Self) -> Self {
        self.cases += other.cases;
        self.rel_err_sum += other.rel_err_sum;
        self.time.consumed += other.time.consumed;
        self.most = match (self.most, other.most) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
        self.worst = match (self.worst, other.worst) {
            (Some(a), Some(b)) => Some(if b.0 > a.0 { b } else { a }),
            (a, b) => a.or(b),
        };
        self
    }

    /// 用例个数.
    #[inline]
    pub fn get_cases(&self) -> u64 {
        self.cases
    }

    /// 平均相对误差. 没有用例时返回 `None`.
    pub fn get_avg_rel_err(&self) -> Option<f64> {
        match self.cases {
            0 => None,
            n => Some(self.rel_err_sum / n as f64),
        }
    }

    /// 相对误差最大的用例.
    #[inline]
    pub fn get_worst(&self) -> Option<(f64, Case)> {
        self.worst
    }

    /// 以微秒为单位获得估计总耗时.
    #[inline]
    pub fn get_total_time_us(&self) -> u64 {
        self.time.consumed.as_micros() as u64
    }

    /// 获取最耗时的一次估计所消耗的时间.
    #[inline]
    pub fn get_most_time_consuming(&self) -> Option<Duration> {
        self.most
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CASE: Case = Case {
        radius_mm: 5.0,
        pixel_spacing: 0.7,
        slice_spacing: 1.25,
    };

    #[test]
    fn test_profile_merge() {
        let mut a = Profile::new();
        a.start();
        assert!((a.record(CASE, 110.0, 100.0) - 0.1).abs() < 1e-12);

        let mut b = Profile::new();
        b.start();
        b.record(Case { radius_mm: 2.0, ..CASE }, 70.0, 100.0);
        b.start();
        b.record(CASE, 100.0, 100.0);

        let m = a.merge(b);
        assert_eq!(m.get_cases(), 3);
        assert!((m.get_avg_rel_err().unwrap() - 0.4 / 3.0).abs() < 1e-12);
        assert_eq!(m.get_worst().unwrap().1.radius_mm, 2.0);
        assert!(m.get_most_time_consuming().is_some());
        assert!(Profile::new().get_avg_rel_err().is_none());
    }
}
