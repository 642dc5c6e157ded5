//! 实验结果.

use crate::profile::{Case, Profile};
use crate::runner::ESTIMATORS;
use std::io::{self, Write};

const S4: &str = "    ";

#[inline]
fn f64_to_display(f: Option<f64>) -> String {
    match f {
        Some(f) => format!("{f:.6}"),
        None => "/".to_string(),
    }
}

/// 单个用例的结果.
#[derive(Clone, Debug)]
pub struct CaseReport {
    /// 用例参数.
    pub case: Case,
    /// 解析体积 (mm³).
    pub analytic: f64,
    /// 各估计器的体积 (mm³), 顺序同 [`ESTIMATORS`].
    pub estimates: [f64; 3],
    /// 最大轴向直径 (mm).
    pub diameter_mm: Option<f64>,
}

/// 将单个用例的结果写进 `w` 中.
fn describe_case_into<W: Write>(r: &CaseReport, w: &mut W) -> io::Result<()> {
    let Case {
        radius_mm,
        pixel_spacing,
        slice_spacing,
    } = r.case;
    writeln!(
        w,
        "Case r = {radius_mm} mm, pixel {pixel_spacing} mm, slice {slice_spacing} mm:"
    )?;
    writeln!(w, "{S4}Analytic volume: {:.3} mm³", r.analytic)?;
    for ((name, _), v) in ESTIMATORS.iter().zip(r.estimates) {
        let rel = (v - r.analytic) / r.analytic * 100.0;
        writeln!(w, "{S4}{name}: {v:.3} mm³ ({rel:+.2}%)")?;
    }
    write!(
        w,
        "{S4}Diameter: {} mm (analytic {:.3} mm)",
        f64_to_display(r.diameter_mm),
        2.0 * radius_mm
    )?;
    Ok(())
}

/// 将估计器 `name` 的统计写进 `w` 中.
fn describe_profile_into<W: Write>(name: &str, p: &Profile, w: &mut W) -> io::Result<()> {
    writeln!(w, "Estimator `{name}`:")?;
    writeln!(w, "{S4}Cases: {}", p.get_cases())?;
    writeln!(
        w,
        "{S4}Average relative error: {}",
        f64_to_display(p.get_avg_rel_err())
    )?;
    match p.get_worst() {
        Some((rel, c)) => writeln!(
            w,
            "{S4}Worst relative error: {rel:.6} (r = {} mm, pixel {} mm, slice {} mm)",
            c.radius_mm, c.pixel_spacing, c.slice_spacing
        )?,
        None => writeln!(w, "{S4}Worst relative error: /")?,
    }
    writeln!(w, "{S4}Total time: {} us", p.get_total_time_us())?;
    let t = p.get_most_time_consuming().map(|d| d.as_micros() as f64);
    write!(w, "{S4}Most time-consuming estimate costs {} us", f64_to_display(t))?;
    Ok(())
}

/// 消融实验最终结果.
#[derive(Clone, Debug)]
pub struct AblationResult {
    reports: Vec<CaseReport>,
    profiles: Vec<(&'static str, Profile)>,
}

impl Default for AblationResult {
    fn default() -> Self {
        Self {
            reports: Vec::new(),
            profiles: ESTIMATORS.iter().map(|(name, _)| (*name, Profile::new())).collect(),
        }
    }
}

impl AblationResult {
    /// 由用例结果和各估计器统计构造. `profiles` 的顺序同 [`ESTIMATORS`].
    pub fn new(reports: Vec<CaseReport>, profiles: [Profile; 3]) -> Self {
        Self {
            reports,
            profiles: ESTIMATORS.iter().map(|(name, _)| *name).zip(profiles).collect(),
        }
    }

    /// 合并另一线程的结果. 用例按先后顺序拼接.
    pub fn merge(mut self, other: Self) -> Self {
        self.reports.extend(other.reports);
        self.profiles = self
            .profiles
            .into_iter()
            .zip(other.profiles)
            .map(|((name, a), (_, b))| (name, a.merge(b)))
            .collect();
        self
    }

    /// 全部用例结果.
    #[inline]
    pub fn reports(&self) -> &[CaseReport] {
        &self.reports
    }

    /// 各估计器统计.
    #[inline]
    pub fn profiles(&self) -> &[(&'static str, Profile)] {
        &self.profiles
    }

    /// 将全部用例与各估计器统计写进 `w` 中, 各部分以分隔线隔开.
    pub fn write_report<W: Write>(&self, w: &mut W) -> io::Result<()> {
        utils::sep_to(w)?;
        for r in self.reports.iter() {
            describe_case_into(r, w)?;
            writeln!(w)?;
        }
        utils::sep_to(w)?;

        for (key, profile) in self.profiles.iter() {
            describe_profile_into(key, profile, w)?;
            writeln!(w)?;
            utils::sep_to(w)?;
        }
        Ok(())
    }

    /// 分析运行结果.
    pub fn analyze(&self) {
        let mut buf = Vec::with_capacity(4096);
        // 写入 `Vec<u8>` 不会失败.
        self.write_report(&mut buf).unwrap();
        print!("{}", String::from_utf8_lossy(&buf));
    }
}
