//! 通用常量.

/// LIDC 数据集中 CT 水平切片的标准边长 (像素).
pub const FRAME_SIZE: usize = 512;

/// 医师特征评分的取值范围 (闭区间).
pub mod score {
    use std::ops::RangeInclusive;

    /// 细微程度 (subtlety).
    pub const SUBTLETY: RangeInclusive<u8> = 1..=5;

    /// 内部结构 (internal structure).
    pub const INTERNAL_STRUCTURE: RangeInclusive<u8> = 1..=4;

    /// 钙化 (calcification).
    pub const CALCIFICATION: RangeInclusive<u8> = 1..=6;

    /// 球形度 (sphericity).
    pub const SPHERICITY: RangeInclusive<u8> = 1..=5;

    /// 边缘 (margin).
    pub const MARGIN: RangeInclusive<u8> = 1..=5;

    /// 分叶 (lobulation).
    pub const LOBULATION: RangeInclusive<u8> = 1..=5;

    /// 毛刺 (spiculation).
    pub const SPICULATION: RangeInclusive<u8> = 1..=5;

    /// 纹理 (texture).
    pub const TEXTURE: RangeInclusive<u8> = 1..=5;

    /// 恶性程度 (malignancy).
    pub const MALIGNANCY: RangeInclusive<u8> = 1..=5;
}
