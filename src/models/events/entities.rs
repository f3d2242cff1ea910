use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评审时间窗口状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ReviewWindowStatus {
    NotStarted, // 评审未开始
    Active,     // 评审进行中
    Ended,      // 评审已结束
}

impl std::fmt::Display for ReviewWindowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewWindowStatus::NotStarted => write!(f, "not_started"),
            ReviewWindowStatus::Active => write!(f, "active"),
            ReviewWindowStatus::Ended => write!(f, "ended"),
        }
    }
}

// 评审活动实体
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReviewEvent {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    // 创建时绑定，此后不可变
    pub template_id: i64,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub upload_deadline: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_by: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewEvent {
    /// 上传窗口判定：截止时间未设置或尚未过期（含截止时刻本身）
    ///
    /// 每次请求实时判定，没有任何缓存或定时状态迁移。
    pub fn upload_open(&self, now: DateTime<Utc>) -> bool {
        match self.upload_deadline {
            None => true,
            Some(deadline) => now <= deadline,
        }
    }

    /// 评审窗口判定：未设置的边界不构成限制
    ///
    /// 只有 Active 状态允许提交/重提评审；NotStarted 和 Ended
    /// 仅阻止写操作，不影响只读查看。
    pub fn review_window(&self, now: DateTime<Utc>) -> ReviewWindowStatus {
        if let Some(start) = self.start_time
            && now < start
        {
            return ReviewWindowStatus::NotStarted;
        }
        if let Some(end) = self.end_time
            && now > end
        {
            return ReviewWindowStatus::Ended;
        }
        ReviewWindowStatus::Active
    }
}

/// 白名单可见性判定
///
/// 空白名单意味着对该角色的所有用户可见，这是刻意的访问控制设计，
/// 不是默认拒绝列表；非空时仅名单内用户可见。
pub fn whitelist_admits(whitelisted_user_ids: &[i64], user_id: i64) -> bool {
    whitelisted_user_ids.is_empty() || whitelisted_user_ids.contains(&user_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn event(
        start: Option<i64>,
        end: Option<i64>,
        upload_deadline: Option<i64>,
    ) -> ReviewEvent {
        ReviewEvent {
            id: 1,
            name: "Spring2024".to_string(),
            description: None,
            template_id: 1,
            start_time: start.map(ts),
            end_time: end.map(ts),
            upload_deadline: upload_deadline.map(ts),
            is_active: true,
            created_by: 1,
            created_at: ts(0),
            updated_at: ts(0),
        }
    }

    #[test]
    fn test_upload_open_without_deadline() {
        assert!(event(None, None, None).upload_open(ts(1000)));
    }

    #[test]
    fn test_upload_open_before_and_at_deadline() {
        let e = event(None, None, Some(1000));
        assert!(e.upload_open(ts(999)));
        // 截止时刻本身仍允许上传
        assert!(e.upload_open(ts(1000)));
        assert!(!e.upload_open(ts(1001)));
    }

    #[test]
    fn test_review_window_unbounded_is_active() {
        assert_eq!(
            event(None, None, None).review_window(ts(12345)),
            ReviewWindowStatus::Active
        );
    }

    #[test]
    fn test_review_window_before_start() {
        let e = event(Some(1000), Some(2000), None);
        assert_eq!(e.review_window(ts(999)), ReviewWindowStatus::NotStarted);
    }

    #[test]
    fn test_review_window_boundaries_are_active() {
        let e = event(Some(1000), Some(2000), None);
        assert_eq!(e.review_window(ts(1000)), ReviewWindowStatus::Active);
        assert_eq!(e.review_window(ts(1500)), ReviewWindowStatus::Active);
        assert_eq!(e.review_window(ts(2000)), ReviewWindowStatus::Active);
    }

    #[test]
    fn test_review_window_after_end() {
        let e = event(Some(1000), Some(2000), None);
        assert_eq!(e.review_window(ts(2001)), ReviewWindowStatus::Ended);
    }

    #[test]
    fn test_review_window_only_start_set() {
        let e = event(Some(1000), None, None);
        assert_eq!(e.review_window(ts(999)), ReviewWindowStatus::NotStarted);
        assert_eq!(e.review_window(ts(99999)), ReviewWindowStatus::Active);
    }

    #[test]
    fn test_review_window_only_end_set() {
        let e = event(None, Some(2000), None);
        assert_eq!(e.review_window(ts(0)), ReviewWindowStatus::Active);
        assert_eq!(e.review_window(ts(2001)), ReviewWindowStatus::Ended);
    }

    #[test]
    fn test_whitelist_empty_means_all() {
        assert!(whitelist_admits(&[], 42));
    }

    #[test]
    fn test_whitelist_nonempty_restricts() {
        // 为 A(1) 添加一行后，B(2) 即不可见
        assert!(whitelist_admits(&[1], 1));
        assert!(!whitelist_admits(&[1], 2));
        assert!(whitelist_admits(&[1, 2, 3], 2));
    }
}
