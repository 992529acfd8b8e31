use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

/// 列表页原始查询参数
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ListParams(HashMap<String, String>);

/// 用户提供的筛选条件，与角色谓词以 AND 组合
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub search: Option<String>,
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
    pub student_id: Option<i64>,
    pub supervisor_id: Option<i64>,
    pub lesson_id: Option<i64>,
}

impl ListParams {
    /// 页码从 1 开始，无法解析或小于 1 时取 1
    pub fn page(&self) -> u64 {
        self.0
            .get("page")
            .and_then(|p| p.trim().parse::<u64>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    /// 未知参数忽略；数字参数解析失败视为未提供
    pub fn filter(&self) -> ListFilter {
        ListFilter {
            search: self
                .0
                .get("q")
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            class_id: self.id_param("classId"),
            teacher_id: self.id_param("teacherId"),
            student_id: self.id_param("studentId"),
            supervisor_id: self.id_param("supervisorId"),
            lesson_id: self.id_param("lessonId"),
        }
    }

    fn id_param(&self, key: &str) -> Option<i64> {
        let raw = self.0.get(key)?;
        match raw.trim().parse::<i64>() {
            Ok(id) => Some(id),
            Err(_) => {
                debug!("Ignoring unparsable query parameter {key}={raw:?}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListParams {
        ListParams(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_page_defaults() {
        assert_eq!(params(&[]).page(), 1);
        assert_eq!(params(&[("page", "3")]).page(), 3);
        assert_eq!(params(&[("page", "0")]).page(), 1);
        assert_eq!(params(&[("page", "-2")]).page(), 1);
        assert_eq!(params(&[("page", "abc")]).page(), 1);
    }

    #[test]
    fn test_filter_mapping() {
        let filter = params(&[
            ("q", "  math "),
            ("classId", "4"),
            ("teacherId", "7"),
            ("sort", "desc"),
        ])
        .filter();
        assert_eq!(
            filter,
            ListFilter {
                search: Some("math".into()),
                class_id: Some(4),
                teacher_id: Some(7),
                ..Default::default()
            }
        );
    }

    // 数字解析失败时静默忽略，而不是报错
    #[test]
    fn test_unparsable_numbers_are_absent() {
        let filter = params(&[("classId", "four"), ("studentId", "1.5"), ("q", "   ")]).filter();
        assert_eq!(filter, ListFilter::default());
    }
}
