use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Datelike, NaiveDate, Utc};

use super::StudentService;
use crate::models::ApiResponse;
use crate::policy::Resource;
use crate::services::common::{internal_error, not_found, viewer_from, within_scope};

/// 出勤率从当年 1 月 1 日起统计
fn start_of_year(now: DateTime<Utc>) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(now.year(), 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|start| start.and_utc())
        .unwrap_or(now)
}

pub async fn get_student(
    service: &StudentService,
    request: &HttpRequest,
    id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let viewer = viewer_from(request)?;

    // 教师只能查看自己任教班级的学生
    match within_scope(&storage, &viewer, Resource::Students, id).await {
        Ok(true) => {}
        Ok(false) => return Ok(not_found("Student")),
        Err(e) => return Ok(internal_error(&format!("Failed to check student {id}"), &e)),
    }

    match storage.get_student_detail(id, start_of_year(Utc::now())).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "Success"))),
        Ok(None) => Ok(not_found("Student")),
        Err(e) => Ok(internal_error(&format!("Failed to load student {id}"), &e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_start_of_year() {
        let now = Utc.with_ymd_and_hms(2024, 9, 14, 10, 30, 0).unwrap();
        assert_eq!(
            start_of_year(now),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
        );
    }
}
