//! 展示层的切片导航状态.
//!
//! 只描述 "当前看哪一层, 显示哪些轮廓", 不涉及任何绘图. 状态由调用方显式持有,
//! 每次交互 (拖动滑块, 勾选复选框) 调用对应方法即可.

use std::collections::HashMap;

use crate::error::{BuildError, BuildResult};
use crate::{Annotation, Contour};

/// 某个标注在其扫描中的切片导航器.
#[derive(Debug, Clone)]
pub struct SliceNavigator<'a> {
    /// 按 z 升序排列的轮廓.
    contours: Vec<&'a Contour>,
    /// 每条轮廓所在的扫描切片索引, 与 `contours` 一一对应.
    slice_of: Vec<usize>,
    slice_count: usize,
    current: usize,
    show_contours: bool,
}

impl<'a> SliceNavigator<'a> {
    /// 由标注和扫描切片标识 (按扫描顺序排列) 构造. 当前切片为标注出现的第一层.
    ///
    /// 某条轮廓的 [`Contour::source_id`] 不在 `slice_ids` 中时, 返回
    /// `Err(BuildError::UnknownSlice)`.
    pub fn new<S: AsRef<str>>(annotation: &'a Annotation, slice_ids: &[S]) -> BuildResult<Self> {
        let index: HashMap<&str, usize> = slice_ids
            .iter()
            .enumerate()
            .map(|(i, s)| (s.as_ref(), i))
            .collect();

        let mut contours: Vec<&Contour> = annotation.contours().iter().collect();
        contours.sort_by(|a, b| a.z_position().total_cmp(&b.z_position()));

        let slice_of = contours
            .iter()
            .map(|c| {
                index
                    .get(c.source_id())
                    .copied()
                    .ok_or_else(|| BuildError::UnknownSlice(c.source_id().to_owned()))
            })
            .collect::<BuildResult<Vec<usize>>>()?;

        // 标注至少有一条轮廓.
        let current = slice_of.iter().copied().min().unwrap_or(0);
        Ok(Self {
            contours,
            slice_of,
            slice_count: slice_ids.len(),
            current,
            show_contours: true,
        })
    }

    /// 按 z 升序排列的轮廓.
    #[inline]
    pub fn contours(&self) -> &[&'a Contour] {
        &self.contours
    }

    /// 第 `k` 条 (排序后) 轮廓所在的扫描切片索引.
    #[inline]
    pub fn slice_of(&self, k: usize) -> usize {
        self.slice_of[k]
    }

    /// 扫描切片总数.
    #[inline]
    pub fn slice_count(&self) -> usize {
        self.slice_count
    }

    /// 标注出现的最低切片索引.
    pub fn min_slice(&self) -> usize {
        self.slice_of.iter().copied().min().unwrap_or(0)
    }

    /// 标注出现的最高切片索引.
    pub fn max_slice(&self) -> usize {
        self.slice_of.iter().copied().max().unwrap_or(0)
    }

    /// 当前切片索引.
    #[inline]
    pub fn current_slice(&self) -> usize {
        self.current
    }

    /// 跳转到第 `slice` 层, 超出扫描范围时截断到边界. 返回实际的当前切片.
    pub fn set_slice(&mut self, slice: usize) -> usize {
        self.current = slice.min(self.slice_count.saturating_sub(1));
        self.current
    }

    /// 相对当前切片移动 `delta` 层, 同样截断到扫描范围.
    pub fn step(&mut self, delta: isize) -> usize {
        self.set_slice(self.current.saturating_add_signed(delta))
    }

    /// 是否显示轮廓.
    #[inline]
    pub fn show_contours(&self) -> bool {
        self.show_contours
    }

    /// 设置是否显示轮廓.
    #[inline]
    pub fn set_show_contours(&mut self, show: bool) {
        self.show_contours = show;
    }

    /// 切换轮廓显示状态, 返回切换后的状态.
    pub fn toggle_contours(&mut self) -> bool {
        self.show_contours = !self.show_contours;
        self.show_contours
    }

    /// 当前切片上应当显示的轮廓. 关闭显示时为空.
    pub fn visible_contours(&self) -> Vec<&'a Contour> {
        if !self.show_contours {
            return Vec::new();
        }
        self.contours
            .iter()
            .zip(&self.slice_of)
            .filter(|(_, s)| **s == self.current)
            .map(|(c, _)| *c)
            .collect()
    }
}
