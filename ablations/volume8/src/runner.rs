//! 程序运行函数.

use crate::profile::{Case, Profile};
use crate::result::{AblationResult, CaseReport};
use log::{debug, info};
use nodule_berry::measure::measure_all;
use nodule_berry::Annotation;
use std::thread;
use utils::config::Volume8Config;

/// 体积估计器.
type Estimator = fn(&Annotation) -> f64;

/// 参与比较的估计器.
pub const ESTIMATORS: [(&str, Estimator); 3] = [
    ("shoelace", shoelace),
    ("voxel-mask", voxel_mask),
    ("voxel-set", voxel_set),
];

/// 鞋带公式乘层厚.
fn shoelace(a: &Annotation) -> f64 {
    a.estimate_volume()
}

/// 三维掩膜体素计数.
fn voxel_mask(a: &Annotation) -> f64 {
    a.as_boolean_mask().voxel_volume_mm3(a.geometry())
}

/// 稀疏体素集合计数. 球模型的层间距均匀, 直接乘以层厚.
fn voxel_set(a: &Annotation) -> f64 {
    let g = a.geometry();
    a.as_voxel_set().len() as f64 * g.pixel_area() * g.slice_thickness()
}

/// 在当前线程上依次运行 `cases`.
fn run_cases(cases: &[Case]) -> AblationResult {
    let mut profiles = ESTIMATORS.map(|_| Profile::new());
    let annotations: Vec<Annotation> = cases
        .iter()
        .zip(1..)
        .map(|(c, id)| {
            utils::off_grid_sphere(c.radius_mm, (c.pixel_spacing, c.slice_spacing)).annotation(id)
        })
        .collect();
    let measurements = measure_all(&annotations);

    let mut reports = Vec::with_capacity(cases.len());
    for ((case, ann), m) in cases.iter().zip(&annotations).zip(&measurements) {
        let analytic = utils::off_grid_sphere(case.radius_mm, (case.pixel_spacing, case.slice_spacing))
            .analytic_volume();
        let mut estimates = [0.0; 3];
        for ((e, (_, estimator)), profile) in estimates.iter_mut().zip(ESTIMATORS).zip(&mut profiles) {
            profile.start();
            *e = estimator(ann);
            profile.record(*case, *e, analytic);
        }
        debug!("{case:?}: analytic {analytic:.3}, estimates {estimates:?}");
        reports.push(CaseReport {
            case: *case,
            analytic,
            estimates,
            diameter_mm: m.diameter.map(|d| d.mm),
        });
    }
    AblationResult::new(reports, profiles)
}

/// 实际运行.
pub fn run(config: &Volume8Config) -> AblationResult {
    let cases: Vec<Case> = config
        .spacings_mm
        .iter()
        .flat_map(|&(pixel_spacing, slice_spacing)| {
            config.radii_mm.iter().map(move |&radius_mm| Case {
                radius_mm,
                pixel_spacing,
                slice_spacing,
            })
        })
        .collect();
    assert!(!cases.is_empty(), "No ablation case configured");

    let threads = utils::cpus().clamp(1, cases.len());
    let chunk = cases.len().div_ceil(threads);
    info!("Running {} cases on {threads} threads...", cases.len());

    thread::scope(|s| {
        let handles: Vec<_> = cases
            .chunks(chunk)
            .map(|part| s.spawn(move || run_cases(part)))
            .collect();
        handles
            .into_iter()
            .map(|th| th.join().expect("Thread joining error"))
            .fold(AblationResult::default(), AblationResult::merge)
    })
}
