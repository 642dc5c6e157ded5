use crate::consts::score;
use crate::error::{BuildError, BuildResult};

/// 医师对结节给出的九项序数特征评分.
///
/// 该结构只保存原始评分; 评分与语义文本之间的映射由外部查表完成.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Characteristics {
    subtlety: u8,
    internal_structure: u8,
    calcification: u8,
    sphericity: u8,
    margin: u8,
    lobulation: u8,
    spiculation: u8,
    texture: u8,
    malignancy: u8,
}

impl Characteristics {
    /// 特征名, 与 [`Self::as_array`] 的顺序一致.
    pub const NAMES: [&'static str; 9] = [
        "subtlety",
        "internalStructure",
        "calcification",
        "sphericity",
        "margin",
        "lobulation",
        "spiculation",
        "texture",
        "malignancy",
    ];

    /// 按 [`Self::NAMES`] 的顺序给出九项评分并逐项检查取值范围.
    ///
    /// 任意一项越界时返回 `Err(BuildError::ScoreOutOfRange)`, 携带第一个越界的特征名.
    pub fn new(scores: [u8; 9]) -> BuildResult<Self> {
        const RANGES: [std::ops::RangeInclusive<u8>; 9] = [
            score::SUBTLETY,
            score::INTERNAL_STRUCTURE,
            score::CALCIFICATION,
            score::SPHERICITY,
            score::MARGIN,
            score::LOBULATION,
            score::SPICULATION,
            score::TEXTURE,
            score::MALIGNANCY,
        ];
        for ((name, range), s) in Self::NAMES.into_iter().zip(RANGES).zip(scores) {
            if !range.contains(&s) {
                return Err(BuildError::ScoreOutOfRange(name, s));
            }
        }
        let [
            subtlety,
            internal_structure,
            calcification,
            sphericity,
            margin,
            lobulation,
            spiculation,
            texture,
            malignancy,
        ] = scores;
        Ok(Self {
            subtlety,
            internal_structure,
            calcification,
            sphericity,
            margin,
            lobulation,
            spiculation,
            texture,
            malignancy,
        })
    }

    /// 九项评分, 顺序同 [`Self::NAMES`].
    pub fn as_array(&self) -> [u8; 9] {
        [
            self.subtlety,
            self.internal_structure,
            self.calcification,
            self.sphericity,
            self.margin,
            self.lobulation,
            self.spiculation,
            self.texture,
            self.malignancy,
        ]
    }

    /// 以 `(特征名, 评分)` 形式迭代.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u8)> {
        Self::NAMES.into_iter().zip(self.as_array())
    }

    /// 细微程度.
    #[inline]
    pub fn subtlety(&self) -> u8 {
        self.subtlety
    }

    /// 内部结构.
    #[inline]
    pub fn internal_structure(&self) -> u8 {
        self.internal_structure
    }

    /// 钙化.
    #[inline]
    pub fn calcification(&self) -> u8 {
        self.calcification
    }

    /// 球形度.
    #[inline]
    pub fn sphericity(&self) -> u8 {
        self.sphericity
    }

    /// 边缘.
    #[inline]
    pub fn margin(&self) -> u8 {
        self.margin
    }

    /// 分叶.
    #[inline]
    pub fn lobulation(&self) -> u8 {
        self.lobulation
    }

    /// 毛刺.
    #[inline]
    pub fn spiculation(&self) -> u8 {
        self.spiculation
    }

    /// 纹理.
    #[inline]
    pub fn texture(&self) -> u8 {
        self.texture
    }

    /// 恶性程度.
    #[inline]
    pub fn malignancy(&self) -> u8 {
        self.malignancy
    }
}
