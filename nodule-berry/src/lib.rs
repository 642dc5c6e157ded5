#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 从医师在 CT 切片上逐层绘制的结节轮廓 (多边形) 出发,
//! 重建三维几何信息: 包围盒, 质心, 最大轴向直径, 体积, 三维布尔掩膜,
//! 以及按掩膜包围盒截取 (并可重采样) 的 CT 体数据.
//!
//! 该 crate 目前仅提供 `safe` 接口.
//!
//! # 注意
//!
//! 1. 标注的存储与 CT 影像的解码不在本 crate 职责范围内. 两者分别通过
//!   [`repository::AnnotationRepository`] 和 [`ImageStack`] 这两个窄接口接入.
//! 2. 轮廓被假定为简单多边形 (无自相交). 自相交轮廓不会报错,
//!   其结果由射线法包含测试自然给出.
//! 3. 所有计算都是同步, 无共享可变状态的纯变换; 对同一 [`Annotation`]
//!   重复调用得到逐位一致的结果.
//!
//! # 开发计划
//!
//! ### 几何基础算子 ✅
//!
//! 点在多边形内测试 (射线法), 鞋带公式面积, 两两距离矩阵.
//!
//! 实现位于 `nodule-berry/src/geometry`.
//!
//! ### 包围盒, 质心, 直径, 体积 ✅
//!
//! 直接基于轮廓几何计算, 不经过栅格化.
//!
//! 实现位于 `nodule-berry/src/measure`.
//!
//! ### 三维布尔掩膜 ✅
//!
//! 在标注包围盒内逐层组合 inclusion / exclusion 轮廓.
//!
//! 实现位于 `nodule-berry/src/mask`.
//!
//! ### CT 子体数据截取与重采样 ✅
//!
//! 处理 "跳层" 标注, 体素填充 (padding), 越界检查, 以及三线性网格插值.
//!
//! 实现位于 `nodule-berry/src/resample`.
//!
//! ### 体素集合与标注一致性 ✅
//!
//! 以稀疏坐标集合表示标注, 计算同一结节不同医师标注之间的 Jaccard / Dice.
//! 与掩膜共享同一全局坐标系 (绝对像素 x/y, 物理 z).
//!
//! 实现位于 `nodule-berry/src/overlap`.
//!
//! ### 展示层查询接口 ✅
//!
//! 切片导航状态由调用方显式持有, 不在闭包中捕获可变状态.
//!
//! 实现位于 `nodule-berry/src/navigator.rs`.
//!
//! ### 最大直径的垂直直径 ⌛️
//!
//! 目前只计算单层内的最大直径.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

/// 二维平面点 `(x, y)`. 轮廓中以像素为单位, 乘以像素间距后以毫米为单位.
pub type Point2d = (f64, f64);

mod data;

pub use data::{
    Annotation, BoxError, Characteristics, Contour, ImageStack, ScanGeometry, ScanImage,
};

pub mod consts;
pub mod error;
pub mod geometry;
pub mod mask;
pub mod measure;
pub mod navigator;
pub mod overlap;
pub mod phantom;
pub mod prelude;
pub mod repository;
pub mod resample;
