//! 按标注包围盒截取 CT 子体数据, 并可重采样到各向同性网格.

mod interp;

pub use interp::GridInterpolator;

use log::debug;
use ndarray::{s, Array3, ArrayView3, Axis};
use num::ToPrimitive;
use std::ops::{Range, RangeInclusive};

use crate::error::{VolumeAxis, VolumeError, VolumeResult};
use crate::geometry::nearest_index;
use crate::mask::BoolMask;
use crate::measure::BoundingBox;
use crate::{Annotation, Idx2d, Idx3d, ImageStack, ScanImage};

/// 三个轴 (顺序为行, 列, 切片) 各自的 `(前, 后)` 体素填充数.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding([(usize, usize); 3]);

impl Padding {
    /// 不填充.
    #[inline]
    pub const fn none() -> Self {
        Self([(0, 0); 3])
    }

    /// 每个轴前后都填充 `n` 个体素.
    #[inline]
    pub const fn uniform(n: usize) -> Self {
        Self([(n, n); 3])
    }

    /// 逐轴指定.
    #[inline]
    pub const fn new(padding: [(usize, usize); 3]) -> Self {
        Self(padding)
    }

    /// 某个轴的 `(前, 后)` 填充数.
    #[inline]
    pub fn axis(&self, axis: VolumeAxis) -> (usize, usize) {
        match axis {
            VolumeAxis::Row => self.0[0],
            VolumeAxis::Column => self.0[1],
            VolumeAxis::Slice => self.0[2],
        }
    }
}

/// [`Annotation::to_volume`] 的选项.
///
/// 填充在重采样 **之前** 进行, 单位是原始体素.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResampleOptions {
    new_spacing: Option<f64>,
    padding: Padding,
}

impl ResampleOptions {
    /// 重采样到各向同性间距 `spacing` (mm).
    ///
    /// `spacing` 必须是有限正数, 否则返回 `None`.
    pub fn new(spacing: f64) -> Option<Self> {
        (spacing.is_finite() && spacing > 0.0).then_some(Self {
            new_spacing: Some(spacing),
            padding: Padding::none(),
        })
    }

    /// 指定填充.
    #[inline]
    pub fn with_padding(mut self, padding: Padding) -> Self {
        self.padding = padding;
        self
    }

    /// 目标间距. `None` 表示不重采样.
    #[inline]
    pub fn new_spacing(&self) -> Option<f64> {
        self.new_spacing
    }

    /// 填充.
    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }
}

/// 结节子体数据: CT 值, 布尔掩膜, 以及两者共享的各轴物理坐标.
///
/// `intensity` 与 `mask` 形状一致, 按 `(row, column, slice)` 组织.
#[derive(Clone, Debug, PartialEq)]
pub struct NoduleVolume {
    intensity: Array3<f32>,
    mask: Array3<bool>,
    bbox: BoundingBox,
    axes: [Vec<f64>; 3],
}

impl NoduleVolume {
    /// CT 值 (HU).
    #[inline]
    pub fn intensity(&self) -> ArrayView3<'_, f32> {
        self.intensity.view()
    }

    /// 布尔掩膜.
    #[inline]
    pub fn mask(&self) -> ArrayView3<'_, bool> {
        self.mask.view()
    }

    /// 掩膜包围盒 (不含填充), 轴顺序为 `y`, `x`, `z`.
    #[inline]
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// 体数据形状.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.intensity.dim()
    }

    /// 行方向各层的物理坐标 (mm), 以截取窗口第一行为 0.
    #[inline]
    pub fn row_positions(&self) -> &[f64] {
        &self.axes[0]
    }

    /// 列方向各层的物理坐标 (mm), 以截取窗口第一列为 0.
    #[inline]
    pub fn column_positions(&self) -> &[f64] {
        &self.axes[1]
    }

    /// 每张切片的 z 物理位置 (mm).
    #[inline]
    pub fn z_positions(&self) -> &[f64] {
        &self.axes[2]
    }

    /// 消费自我, 获得 CT 值, 掩膜与包围盒.
    #[inline]
    pub fn into_parts(self) -> (Array3<f32>, Array3<bool>, BoundingBox) {
        (self.intensity, self.mask, self.bbox)
    }

    /// 以 `spacing` 为间距在三个轴上重新采样. CT 值三线性插值,
    /// 掩膜先按 0/1 插值, 再以 `> 0` 重新二值化.
    fn resampled(self, spacing: f64) -> Self {
        let [a0, a1, a2] = &self.axes;
        let axes_ref: [&[f64]; 3] = [a0, a1, a2];
        // 每个轴至少有一个坐标.
        let grid = axes_ref.map(|a| arange(a[0], a[a.len() - 1], spacing));
        let grid_ref: [&[f64]; 3] = [&grid[0], &grid[1], &grid[2]];

        let intensity = self.intensity.mapv(f64::from);
        // 行列坐标由正间距生成, z 坐标有限且已排序去重, 均严格递增.
        let interp = GridInterpolator::new(axes_ref, intensity.view()).unwrap();
        let intensity = sample(&interp, grid_ref).mapv(|v| v as f32);

        let mask = self.mask.mapv(|b| if b { 1.0 } else { 0.0 });
        let interp = GridInterpolator::new(axes_ref, mask.view()).unwrap();
        let mask = sample(&interp, grid_ref).mapv(|v| v > 0.0);

        debug!(
            "resampled volume {:?} -> {:?} at {spacing} mm",
            self.intensity.dim(),
            intensity.dim()
        );
        Self {
            intensity,
            mask,
            bbox: self.bbox,
            axes: grid,
        }
    }
}

#[inline]
fn sample(interp: &GridInterpolator, grid: [&[f64]; 3]) -> Array3<f64> {
    #[cfg(feature = "rayon")]
    let out = interp.par_sample(grid);
    #[cfg(not(feature = "rayon"))]
    let out = interp.sample(grid);
    out
}

/// `start, start + step, ...` 中小于 `stop` 的部分, 至少包含 `start` 本身.
fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    let n = ((stop - start) / step).ceil().to_usize().unwrap_or(0).max(1);
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// `usize` 到 `i64` 的饱和转换.
#[inline]
fn to_index(v: usize) -> i64 {
    v.to_i64().unwrap_or(i64::MAX)
}

/// 计算行或列方向的截取窗口 (左闭右开).
///
/// 掩膜在该轴上从像素 `floor(min)` 开始, 共 `len` 个像素; 前后再各扩展 `pad`.
/// 窗口越出 `[0, frame)` 时返回错误, 不做截断.
fn pixel_window(
    axis: VolumeAxis,
    min: f64,
    len: usize,
    (before, after): (usize, usize),
    frame: usize,
) -> VolumeResult<Range<usize>> {
    // 坐标均为有限值; 超出 i64 范围时同样视为越界.
    let start = min.floor().to_i64().unwrap_or(i64::MIN);
    let lower = start.saturating_sub(to_index(before));
    let upper = start
        .saturating_add(to_index(len))
        .saturating_add(to_index(after));
    if lower < 0 || upper > to_index(frame) {
        return Err(VolumeError::PaddingOutOfBounds { axis, lower, upper });
    }
    Ok(lower as usize..upper as usize)
}

/// 计算切片方向的截取窗口 (闭区间). 越出 `[0, count)` 时返回错误.
fn slice_window(
    start: usize,
    stop: usize,
    (before, after): (usize, usize),
    count: usize,
) -> VolumeResult<RangeInclusive<usize>> {
    let lower = to_index(start).saturating_sub(to_index(before));
    let upper = to_index(stop).saturating_add(to_index(after));
    if lower < 0 || upper >= to_index(count) {
        return Err(VolumeError::PaddingOutOfBounds {
            axis: VolumeAxis::Slice,
            lower,
            upper,
        });
    }
    Ok(lower as usize..=upper as usize)
}

/// 按 z 排序并去重, 同时检查所有 z 均为有限值, 所有切片形状一致.
fn sorted_images(images: &[ScanImage]) -> VolumeResult<Vec<&ScanImage>> {
    if let Some(img) = images.iter().find(|img| !img.z_position().is_finite()) {
        return Err(VolumeError::NonFiniteZ(img.source_id().to_owned()));
    }
    let mut sorted: Vec<&ScanImage> = images.iter().collect();
    sorted.sort_by(|a, b| a.z_position().total_cmp(&b.z_position()));
    sorted.dedup_by(|a, b| a.z_position() == b.z_position());
    if sorted.len() < images.len() {
        debug!("dropped {} images with duplicate z", images.len() - sorted.len());
    }

    let frame: Idx2d = sorted.first().ok_or(VolumeError::EmptyStack)?.frame_shape();
    if let Some((i, img)) = sorted
        .iter()
        .enumerate()
        .find(|(_, img)| img.frame_shape() != frame)
    {
        return Err(VolumeError::FrameMismatch(i, frame, img.frame_shape()));
    }
    Ok(sorted)
}

/// 标注 "跳层" 时, 把掩膜扩展到连续的扫描切片范围 `scan_zs`.
///
/// 每层掩膜按其 z 位置放到最近的扫描切片上, 其余层全为 `false`.
fn reconcile_gaps(mask: BoolMask, scan_zs: &[f64]) -> Array3<bool> {
    let (rows, columns, slices) = mask.shape();
    if slices == scan_zs.len() {
        return mask.into_parts().0;
    }
    debug!(
        "contours cover {slices} of {} scan slices, filling the gaps",
        scan_zs.len()
    );
    let mut out = Array3::from_elem((rows, columns, scan_zs.len()), false);
    for (k, &z) in mask.z_positions().iter().enumerate() {
        let zi = nearest_index(scan_zs, z);
        out.index_axis_mut(Axis(2), zi)
            .zip_mut_with(&mask.slice_at(k), |d, s| *d |= *s);
    }
    out
}

/// 在掩膜四周补 `false`.
fn pad_mask(mask: Array3<bool>, padding: Padding) -> Array3<bool> {
    if padding == Padding::none() {
        return mask;
    }
    let (rows, columns, slices) = mask.dim();
    let [(r0, r1), (c0, c1), (s0, s1)] = padding.0;
    let mut out = Array3::from_elem((rows + r0 + r1, columns + c0 + c1, slices + s0 + s1), false);
    out.slice_mut(s![r0..r0 + rows, c0..c0 + columns, s0..s0 + slices])
        .assign(&mask);
    out
}

/// 从每张影像中截取 `rows x columns` 窗口, 沿 z 堆叠.
fn extract(images: &[&ScanImage], rows: Range<usize>, columns: Range<usize>) -> Array3<f32> {
    let mut out = Array3::zeros((rows.len(), columns.len(), images.len()));
    for (mut dst, img) in out.axis_iter_mut(Axis(2)).zip(images) {
        dst.assign(&img.pixels().slice(s![rows.clone(), columns.clone()]));
    }
    out
}

impl Annotation {
    /// 截取标注包围盒范围内的 CT 子体数据, 同时返回与之对齐的布尔掩膜.
    ///
    /// 处理流程:
    ///
    /// 1. 由 [`Self::as_boolean_mask`] 得到掩膜与包围盒.
    /// 2. 加载影像栈, 将包围盒的 z 范围匹配到最近的扫描切片.
    /// 3. 若标注 "跳层", 将掩膜扩展到连续的切片范围, 缺失层全为 `false`.
    /// 4. 检查填充后的窗口是否仍在影像范围内 (行列不超过切片尺寸, z 不超过切片数).
    /// 5. 截取 CT 值, 掩膜四周补 `false`.
    /// 6. 若指定了目标间距, 以三线性插值重采样两者, 掩膜以 `> 0` 重新二值化.
    ///
    /// # 注意
    ///
    /// 所有检查都在构造输出之前完成; 出错时不会产生任何部分结果.
    ///
    /// # 返回值
    ///
    /// 1. 影像加载失败, 返回 `Err(VolumeError::ImageLoad)`.
    /// 2. 影像栈为空, 切片 z 位置不是有限值, 或切片形状不一致, 分别返回
    ///   `Err(VolumeError::EmptyStack)`, `Err(VolumeError::NonFiniteZ)`,
    ///   `Err(VolumeError::FrameMismatch)`.
    /// 3. 填充越界, 返回 `Err(VolumeError::PaddingOutOfBounds)`, 其中记录越界的轴和索引.
    /// 4. 目标间距不是有限正数, 返回 `Err(VolumeError::InvalidSpacing)`.
    pub fn to_volume<S>(&self, stack: &S, options: &ResampleOptions) -> VolumeResult<NoduleVolume>
    where
        S: ImageStack + ?Sized,
    {
        if let Some(spacing) = options.new_spacing {
            if !(spacing.is_finite() && spacing > 0.0) {
                return Err(VolumeError::InvalidSpacing(spacing));
            }
        }

        let mask = self.as_boolean_mask();
        let bbox = *mask.bbox();

        let loaded = stack.load_images().map_err(VolumeError::ImageLoad)?;
        let images = sorted_images(&loaded)?;
        let frame = images[0].frame_shape();
        let img_zs: Vec<f64> = images.iter().map(|img| img.z_position()).collect();
        debug!("annotation {}: {} images of {frame:?}", self.id(), images.len());

        let zi_start = nearest_index(&img_zs, bbox.min(2));
        let zi_stop = nearest_index(&img_zs, bbox.max(2));

        let padding = options.padding;
        let (rows, columns, _) = mask.shape();
        let z_window = slice_window(zi_start, zi_stop, padding.axis(VolumeAxis::Slice), images.len())?;
        let row_window = pixel_window(
            VolumeAxis::Row,
            bbox.min(0),
            rows,
            padding.axis(VolumeAxis::Row),
            frame.0,
        )?;
        let column_window = pixel_window(
            VolumeAxis::Column,
            bbox.min(1),
            columns,
            padding.axis(VolumeAxis::Column),
            frame.1,
        )?;

        let mask = pad_mask(reconcile_gaps(mask, &img_zs[zi_start..=zi_stop]), padding);
        let intensity = extract(&images[z_window.clone()], row_window, column_window);
        debug_assert_eq!(mask.dim(), intensity.dim());

        let ps = self.geometry().pixel_spacing();
        let (rows, columns, _) = mask.dim();
        let volume = NoduleVolume {
            intensity,
            mask,
            bbox,
            axes: [
                (0..rows).map(|i| i as f64 * ps).collect(),
                (0..columns).map(|j| j as f64 * ps).collect(),
                img_zs[z_window].to_vec(),
            ],
        };

        Ok(match options.new_spacing {
            Some(spacing) => volume.resampled(spacing),
            None => volume,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::{self, SpherePhantom, LUNG_HU, NODULE_HU};
    use crate::{BoxError, Contour};
    use ndarray::Array2;
    use std::borrow::Cow;

    fn sphere() -> SpherePhantom {
        SpherePhantom::new(3.0).with_center((16.0, 16.0))
    }

    #[test]
    fn test_to_volume_identity() {
        let s = sphere();
        let ann = s.annotation(1);
        let stack = s.image_stack((32, 32), 2);
        let v = ann.to_volume(&stack, &ResampleOptions::default()).unwrap();

        let mask = ann.as_boolean_mask();
        assert_eq!(v.shape(), mask.shape());
        assert_eq!(v.mask(), mask.data());
        assert_eq!(v.z_positions(), s.slice_positions().as_slice());
        assert_eq!(v.bbox(), mask.bbox());

        // 包围盒从像素 11 开始, 球心 (16, 16) 位于第 5 行第 5 列.
        assert_eq!(mask.bbox().min(0).floor(), 11.0);
        let mid = v.z_positions().len() / 2;
        assert!(v.mask()[(5, 5, mid)]);
        assert_eq!(v.intensity()[(5, 5, mid)], NODULE_HU);
        assert_eq!(v.intensity()[(0, 0, 0)], LUNG_HU);
        assert!(!v.mask()[(0, 0, 0)]);
    }

    #[test]
    fn test_padding() {
        let s = sphere();
        let ann = s.annotation(1);
        let stack = s.image_stack((32, 32), 2);
        let opts = ResampleOptions::default().with_padding(Padding::new([(1, 1), (2, 0), (1, 1)]));
        let v = ann.to_volume(&stack, &opts).unwrap();

        let (rows, columns, slices) = ann.as_boolean_mask().shape();
        assert_eq!(v.shape(), (rows + 2, columns + 2, slices + 2));
        assert_eq!(v.mask().dim(), v.intensity().dim());
        assert_eq!(v.z_positions().len(), slices + 2);
        // 填充区域的掩膜全为 false, CT 值取自影像.
        assert!(v.mask().index_axis(Axis(2), 0).iter().all(|m| !m));
        assert!(v.intensity().index_axis(Axis(2), 0).iter().all(|x| *x == LUNG_HU));
        // 球心从 (5, 5) 平移到 (6, 7).
        assert!(v.mask()[(6, 7, slices / 2 + 1)]);
    }

    #[test]
    fn test_padding_out_of_bounds() {
        let s = sphere();
        let ann = s.annotation(1);

        let stack = s.image_stack((32, 32), 0);
        let opts = ResampleOptions::default().with_padding(Padding::new([(0, 0), (0, 0), (1, 0)]));
        let err = ann.to_volume(&stack, &opts).unwrap_err();
        assert!(matches!(
            err,
            VolumeError::PaddingOutOfBounds {
                axis: VolumeAxis::Slice,
                lower: -1,
                ..
            }
        ));

        let opts = ResampleOptions::default().with_padding(Padding::new([(20, 0), (0, 0), (0, 0)]));
        let err = ann.to_volume(&stack, &opts).unwrap_err();
        assert!(matches!(
            err,
            VolumeError::PaddingOutOfBounds {
                axis: VolumeAxis::Row,
                lower: -9,
                ..
            }
        ));

        let opts = ResampleOptions::default().with_padding(Padding::new([(0, 0), (0, 12), (0, 0)]));
        let err = ann.to_volume(&stack, &opts).unwrap_err();
        assert!(matches!(
            err,
            VolumeError::PaddingOutOfBounds {
                axis: VolumeAxis::Column,
                ..
            }
        ));
    }

    #[test]
    fn test_gap_reconciliation() {
        let s = sphere();
        let full = s.annotation(1);
        // 去掉第二层轮廓, 模拟跳层.
        let contours: Vec<Contour> = full
            .contours()
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != 1)
            .map(|(_, c)| c.clone())
            .collect();
        let skipped = Annotation::new(2, 0, *full.geometry(), contours).unwrap();
        assert_eq!(skipped.as_boolean_mask().shape().2, full.contours().len() - 1);

        let stack = s.image_stack((32, 32), 1);
        let v = skipped.to_volume(&stack, &ResampleOptions::default()).unwrap();
        let full_mask = full.as_boolean_mask();
        assert_eq!(v.shape(), full_mask.shape());
        assert!(v.mask().index_axis(Axis(2), 1).iter().all(|m| !m));
        assert_eq!(v.mask().index_axis(Axis(2), 0), full_mask.slice_at(0));
        assert_eq!(v.mask().index_axis(Axis(2), 2), full_mask.slice_at(2));
    }

    #[test]
    fn test_resample() {
        let s = sphere();
        let ann = s.annotation(1);
        let stack = s.image_stack((32, 32), 0);
        let raw = ann.to_volume(&stack, &ResampleOptions::default()).unwrap();
        let v = ann.to_volume(&stack, &ResampleOptions::new(0.5).unwrap()).unwrap();

        let (rows, columns, _) = raw.shape();
        let expect = |n: usize, step: f64| ((n - 1) as f64 * step / 0.5).ceil() as usize;
        assert_eq!(v.shape(), (expect(rows, 0.7), expect(columns, 0.7), 10));
        assert_eq!(v.mask().dim(), v.intensity().dim());
        assert_eq!(v.z_positions()[0], -2.5);
        assert!(v.intensity().iter().all(|x| (LUNG_HU..=NODULE_HU).contains(x)));

        // 球心 (行列 3.5 mm, z = 0) 位于新网格 (7, 7, 5).
        assert!(v.mask()[(7, 7, 5)]);
        assert!((v.intensity()[(7, 7, 5)] - NODULE_HU).abs() < 1e-3);
        assert!(v.mask().iter().filter(|m| **m).count() > raw.mask().iter().filter(|m| **m).count());
    }

    #[test]
    fn test_identity_resample() {
        // 影像 z 由 `z0 + k * s` 得到, 新网格由 `z_first + i * s` 得到, 两者相差若干 ulp.
        let s = sphere().with_pixel_spacing(0.7).with_slice_spacing(0.7);
        let ann = s.annotation(1);
        let stack = s.image_stack((32, 32), 1);
        let raw = ann.to_volume(&stack, &ResampleOptions::default()).unwrap();
        let v = ann.to_volume(&stack, &ResampleOptions::new(0.7).unwrap()).unwrap();

        let (r0, c0, z0) = raw.shape();
        let (r1, c1, z1) = v.shape();
        let (rows, columns, slices) = (r0.min(r1), c0.min(c1), z0.min(z1));
        assert!(rows > 0 && columns > 0 && slices > 0);
        for z in 0..slices {
            assert!((raw.z_positions()[z] - v.z_positions()[z]).abs() < 1e-9);
        }

        let intensity = |a: ArrayView3<f32>| a.slice(s![..rows, ..columns, ..slices]).to_owned();
        let mask = |a: ArrayView3<bool>| a.slice(s![..rows, ..columns, ..slices]).to_owned();
        assert_eq!(intensity(raw.intensity()), intensity(v.intensity()));
        assert_eq!(mask(raw.mask()), mask(v.mask()));
        assert!(mask(v.mask()).iter().any(|m| *m));
    }

    #[test]
    fn test_non_finite_z() {
        let s = sphere();
        let ann = s.annotation(1);
        let opts = ResampleOptions::new(0.5)
            .unwrap()
            .with_padding(Padding::new([(0, 0), (0, 0), (0, 2)]));

        for z in [f64::NAN, f64::INFINITY] {
            let mut stack = s.image_stack((32, 32), 0);
            stack.push(ScanImage::new("broken", z, Array2::zeros((32, 32))));
            let err = ann.to_volume(stack.as_slice(), &opts).unwrap_err();
            assert!(matches!(err, VolumeError::NonFiniteZ(ref id) if id == "broken"));
        }
    }

    #[test]
    fn test_invalid_options() {
        assert!(ResampleOptions::new(0.0).is_none());
        assert!(ResampleOptions::new(f64::NAN).is_none());

        let s = sphere();
        let stack = s.image_stack((32, 32), 0);
        let opts = ResampleOptions {
            new_spacing: Some(-1.0),
            padding: Padding::none(),
        };
        let err = s.annotation(1).to_volume(&stack, &opts).unwrap_err();
        assert!(matches!(err, VolumeError::InvalidSpacing(_)));
    }

    struct BrokenStack;

    impl ImageStack for BrokenStack {
        fn load_images(&self) -> Result<Cow<'_, [ScanImage]>, BoxError> {
            Err("disk unavailable".into())
        }
    }

    #[test]
    fn test_stack_errors() {
        let ann = sphere().annotation(1);
        let opts = ResampleOptions::default();

        let err = ann.to_volume(&BrokenStack, &opts).unwrap_err();
        assert!(matches!(err, VolumeError::ImageLoad(_)));

        let empty: Vec<ScanImage> = vec![];
        let err = ann.to_volume(&empty, &opts).unwrap_err();
        assert!(matches!(err, VolumeError::EmptyStack));

        let mut stack = phantom::stack_from_fn((32, 32), &[-1.0, 0.0, 1.0], |_, _, _| 0.0);
        stack.extend(phantom::stack_from_fn((16, 32), &[2.0], |_, _, _| 0.0));
        let err = ann.to_volume(stack.as_slice(), &opts).unwrap_err();
        assert!(matches!(err, VolumeError::FrameMismatch(3, (32, 32), (16, 32))));
    }

    #[test]
    fn test_arange() {
        assert_eq!(arange(0.0, 1.0, 0.5), vec![0.0, 0.5]);
        assert_eq!(arange(0.0, 1.1, 0.5), vec![0.0, 0.5, 1.0]);
        assert_eq!(arange(2.0, 2.0, 0.5), vec![2.0]);
    }
}
