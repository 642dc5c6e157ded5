//! 标注存储接口.
//!
//! 几何计算只依赖 [`Annotation`] 值对象本身; 标注从何处加载 (数据库, 文件等)
//! 由实现该 trait 的外部协作方决定.

use std::collections::BTreeMap;

use crate::error::{BuildError, BuildResult};
use crate::Annotation;

/// 只读的标注仓库.
pub trait AnnotationRepository {
    /// 按 id 查找标注.
    fn get(&self, id: u64) -> Option<&Annotation>;

    /// 某次扫描的全部标注, 按 id 升序.
    fn by_scan(&self, scan_id: u64) -> Vec<&Annotation>;

    /// 满足 `predicate` 的全部标注, 按 id 升序.
    fn query(&self, predicate: &dyn Fn(&Annotation) -> bool) -> Vec<&Annotation>;

    /// 标注总数.
    fn len(&self) -> usize;

    /// 仓库是否为空.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 基于内存的标注仓库.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    annotations: BTreeMap<u64, Annotation>,
}

impl MemoryRepository {
    /// 空仓库.
    pub fn new() -> Self {
        Self::default()
    }

    /// 由一批标注构造. 出现重复 id 时返回 `Err(BuildError::DuplicateAnnotation)`.
    pub fn with_annotations<I>(annotations: I) -> BuildResult<Self>
    where
        I: IntoIterator<Item = Annotation>,
    {
        let mut repo = Self::new();
        for ann in annotations {
            repo.insert(ann)?;
        }
        Ok(repo)
    }

    /// 插入一条标注. id 已存在时返回 `Err(BuildError::DuplicateAnnotation)`, 仓库保持不变.
    pub fn insert(&mut self, annotation: Annotation) -> BuildResult<()> {
        let id = annotation.id();
        if self.annotations.contains_key(&id) {
            return Err(BuildError::DuplicateAnnotation(id));
        }
        self.annotations.insert(id, annotation);
        Ok(())
    }

    /// 按 id 升序遍历.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> + '_ {
        self.annotations.values()
    }
}

impl AnnotationRepository for MemoryRepository {
    fn get(&self, id: u64) -> Option<&Annotation> {
        self.annotations.get(&id)
    }

    fn by_scan(&self, scan_id: u64) -> Vec<&Annotation> {
        self.query(&|a| a.scan_id() == scan_id)
    }

    fn query(&self, predicate: &dyn Fn(&Annotation) -> bool) -> Vec<&Annotation> {
        self.annotations.values().filter(|a| predicate(a)).collect()
    }

    fn len(&self) -> usize {
        self.annotations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::rectangle;
    use crate::{Characteristics, Contour, ScanGeometry};

    fn annotation(id: u64, scan_id: u64, malignancy: u8) -> Annotation {
        let c = Contour::new(rectangle(0.0, 0.0, 4.0, 4.0), 0.0, true, "s").unwrap();
        let g = ScanGeometry::new(0.7, 1.25).unwrap();
        let ch = Characteristics::new([3, 1, 6, 4, 4, 2, 1, 5, malignancy]).unwrap();
        Annotation::new(id, scan_id, g, vec![c])
            .unwrap()
            .with_characteristics(ch)
    }

    #[test]
    fn test_memory_repository() {
        let repo = MemoryRepository::with_annotations([
            annotation(3, 10, 2),
            annotation(1, 10, 5),
            annotation(2, 11, 4),
        ])
        .unwrap();

        assert_eq!(repo.len(), 3);
        assert!(!repo.is_empty());
        assert_eq!(repo.get(2).map(Annotation::scan_id), Some(11));
        assert!(repo.get(9).is_none());

        let ids: Vec<u64> = repo.by_scan(10).iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![1, 3]);

        let suspicious = repo.query(&|a| a.characteristics().map_or(false, |c| c.malignancy() >= 4));
        assert_eq!(suspicious.len(), 2);
        assert!(repo.iter().map(Annotation::id).eq([1, 2, 3]));
    }

    #[test]
    fn test_duplicate_rejected() {
        let err = MemoryRepository::with_annotations([annotation(1, 1, 1), annotation(1, 2, 1)]);
        assert_eq!(err.unwrap_err(), BuildError::DuplicateAnnotation(1));

        let mut repo = MemoryRepository::new();
        repo.insert(annotation(5, 1, 1)).unwrap();
        assert!(repo.insert(annotation(5, 1, 2)).is_err());
        assert_eq!(repo.get(5).and_then(|a| a.characteristics()).map(|c| c.malignancy()), Some(1));
    }
}
