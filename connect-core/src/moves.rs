//! 走法列表

use std::fmt;

use crate::constants::COLUMNS;

/// 走法即列索引 `0..COLUMNS`
pub type Column = usize;

/// 定长有序走法列表
///
/// 容量固定为列数，不分配堆内存。合法走法枚举按列号升序写入，
/// MCTS 扩展时按值删除已展开的列，剩余元素保持原有顺序。
#[derive(Clone, Copy)]
pub struct MoveList {
    columns: [Column; COLUMNS],
    len: usize,
}

impl MoveList {
    /// 创建空列表
    pub fn new() -> Self {
        Self {
            columns: [0; COLUMNS],
            len: 0,
        }
    }

    /// 追加一列（调用方保证不重复且未超过容量）
    pub fn push(&mut self, column: Column) {
        debug_assert!(self.len < COLUMNS, "MoveList overflow");
        debug_assert!(!self.contains(column), "duplicate column {}", column);
        self.columns[self.len] = column;
        self.len += 1;
    }

    /// 按值删除，返回是否删除成功
    pub fn remove(&mut self, column: Column) -> bool {
        match self.as_slice().iter().position(|&c| c == column) {
            Some(index) => {
                self.columns.copy_within(index + 1..self.len, index);
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, column: Column) -> bool {
        self.as_slice().contains(&column)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn first(&self) -> Option<Column> {
        self.as_slice().first().copied()
    }

    pub fn as_slice(&self) -> &[Column] {
        &self.columns[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = Column> + '_ {
        self.as_slice().iter().copied()
    }

    /// 清空（用于终局节点）
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

// 只比较有效部分，`len` 之后的残留值不参与
impl PartialEq for MoveList {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for MoveList {}

impl fmt::Debug for MoveList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl FromIterator<Column> for MoveList {
    fn from_iter<I: IntoIterator<Item = Column>>(iter: I) -> Self {
        let mut list = MoveList::new();
        for column in iter {
            list.push(column);
        }
        list
    }
}
