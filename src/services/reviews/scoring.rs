//! 评分引擎
//!
//! 加权综合分与文档聚合统计的纯函数实现。聚合结果每次读取时重新计算，
//! 不做缓存，也不做增量维护。

use std::collections::HashMap;

use crate::errors::{DocReviewError, Result};
use crate::models::documents::responses::DimensionAverage;
use crate::models::reviews::entities::{Review, ReviewDetail};
use crate::models::reviews::requests::DimensionScoreInput;
use crate::models::templates::entities::Dimension;

/// 四舍五入保留两位小数
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 校验提交的维度分并计算加权综合分
///
/// 要求提交覆盖模板的全部维度，每个分值在 [0, 100] 内；任何一项
/// 不满足则整体拒绝，调用方不得写入任何明细。
/// 综合分 = Σ(score_i × weight_i) / Σ(weight_i)，保留两位小数。
/// 全部权重为零时分母退化为 1.0 以避免除零；此时综合分接近零，
/// 是已记录的边界情况，不做修正。
pub fn compute_composite(
    dimensions: &[Dimension],
    scores: &[DimensionScoreInput],
) -> Result<f64> {
    let by_dimension: HashMap<i64, &DimensionScoreInput> =
        scores.iter().map(|s| (s.dimension_id, s)).collect();

    let mut weighted_sum = 0.0;
    let mut weight_sum = 0.0;

    for dimension in dimensions {
        let input = by_dimension.get(&dimension.id).ok_or_else(|| {
            DocReviewError::validation(format!("缺少维度 \"{}\" 的评分", dimension.name))
        })?;

        if !input.score.is_finite() || input.score < 0.0 || input.score > 100.0 {
            return Err(DocReviewError::validation(format!(
                "维度 \"{}\" 的评分必须在 0-100 之间",
                dimension.name
            )));
        }

        weighted_sum += input.score * dimension.weight;
        weight_sum += dimension.weight;
    }

    // 多余的维度 ID 视为无效提交
    if scores.len() != dimensions.len() {
        return Err(DocReviewError::validation(
            "提交包含不属于该模板的维度".to_string(),
        ));
    }

    let denominator = if weight_sum == 0.0 { 1.0 } else { weight_sum };
    Ok(round2(weighted_sum / denominator))
}

/// 文档平均分：已完成评审综合分的算术平均
///
/// 没有已完成评审时返回 None（不是 0）。
pub fn average_composite(completed_reviews: &[Review]) -> Option<f64> {
    let scores: Vec<f64> = completed_reviews.iter().filter_map(|r| r.score).collect();
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().sum();
    Some(round2(sum / scores.len() as f64))
}

/// 各维度平均分：跨已完成评审对每个维度的原始分求算术平均
///
/// 与综合分平均相互独立（不再次加权），用于诊断展示。
pub fn per_dimension_averages(
    dimensions: &[Dimension],
    details: &[ReviewDetail],
) -> Vec<DimensionAverage> {
    dimensions
        .iter()
        .filter_map(|dimension| {
            let scores: Vec<f64> = details
                .iter()
                .filter(|d| d.dimension_id == dimension.id)
                .map(|d| d.score)
                .collect();
            if scores.is_empty() {
                return None;
            }
            let sum: f64 = scores.iter().sum();
            Some(DimensionAverage {
                dimension_id: dimension.id,
                name: dimension.name.clone(),
                average: round2(sum / scores.len() as f64),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reviews::entities::ReviewStatus;

    fn dimension(id: i64, name: &str, weight: f64) -> Dimension {
        Dimension {
            id,
            template_id: 1,
            name: name.to_string(),
            weight,
            order_index: (id - 1) as i32,
        }
    }

    fn input(dimension_id: i64, score: f64) -> DimensionScoreInput {
        DimensionScoreInput {
            dimension_id,
            score,
            comment: None,
        }
    }

    fn review(id: i64, score: Option<f64>) -> Review {
        Review {
            id,
            document_id: 1,
            reviewer_id: id,
            score,
            comment: None,
            status: ReviewStatus::Completed,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn detail(review_id: i64, dimension_id: i64, score: f64) -> ReviewDetail {
        ReviewDetail {
            id: review_id * 10 + dimension_id,
            review_id,
            dimension_id,
            score,
            comment: None,
        }
    }

    #[test]
    fn test_composite_weighted_average() {
        // A=0.6, B=0.4; 80*0.6 + 90*0.4 = 84.0
        let dims = vec![dimension(1, "A", 0.6), dimension(2, "B", 0.4)];
        let scores = vec![input(1, 80.0), input(2, 90.0)];
        assert_eq!(compute_composite(&dims, &scores).unwrap(), 84.0);
    }

    #[test]
    fn test_composite_normalizes_by_weight_sum() {
        // 权重不归一时按 Σw 归一：(80*3 + 90*1) / 4 = 82.5
        let dims = vec![dimension(1, "A", 3.0), dimension(2, "B", 1.0)];
        let scores = vec![input(1, 80.0), input(2, 90.0)];
        assert_eq!(compute_composite(&dims, &scores).unwrap(), 82.5);
    }

    #[test]
    fn test_composite_rounds_to_two_decimals() {
        let dims = vec![dimension(1, "A", 1.0), dimension(2, "B", 1.0), dimension(3, "C", 1.0)];
        let scores = vec![input(1, 80.0), input(2, 85.0), input(3, 90.5)];
        // (80 + 85 + 90.5) / 3 = 85.1666...
        assert_eq!(compute_composite(&dims, &scores).unwrap(), 85.17);
    }

    #[test]
    fn test_composite_zero_weights_degenerate() {
        // 全零权重：分母退化为 1.0，结果接近零而不是除零
        let dims = vec![dimension(1, "A", 0.0), dimension(2, "B", 0.0)];
        let scores = vec![input(1, 80.0), input(2, 90.0)];
        assert_eq!(compute_composite(&dims, &scores).unwrap(), 0.0);
    }

    #[test]
    fn test_composite_missing_dimension_rejected() {
        let dims = vec![dimension(1, "A", 0.6), dimension(2, "B", 0.4)];
        let scores = vec![input(1, 80.0)];
        assert!(compute_composite(&dims, &scores).is_err());
    }

    #[test]
    fn test_composite_out_of_range_rejected() {
        let dims = vec![dimension(1, "A", 1.0)];
        assert!(compute_composite(&dims, &[input(1, 100.5)]).is_err());
        assert!(compute_composite(&dims, &[input(1, -0.1)]).is_err());
        assert!(compute_composite(&dims, &[input(1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_composite_extra_dimension_rejected() {
        let dims = vec![dimension(1, "A", 1.0)];
        let scores = vec![input(1, 80.0), input(99, 50.0)];
        assert!(compute_composite(&dims, &scores).is_err());
    }

    #[test]
    fn test_composite_boundary_scores_accepted() {
        let dims = vec![dimension(1, "A", 0.5), dimension(2, "B", 0.5)];
        let scores = vec![input(1, 0.0), input(2, 100.0)];
        assert_eq!(compute_composite(&dims, &scores).unwrap(), 50.0);
    }

    #[test]
    fn test_average_none_when_no_completed_reviews() {
        assert_eq!(average_composite(&[]), None);
    }

    #[test]
    fn test_average_defined_from_first_review() {
        assert_eq!(average_composite(&[review(1, Some(84.0))]), Some(84.0));
        assert_eq!(
            average_composite(&[review(1, Some(80.0)), review(2, Some(90.0))]),
            Some(85.0)
        );
    }

    #[test]
    fn test_average_rounds_to_two_decimals() {
        let reviews = vec![
            review(1, Some(80.0)),
            review(2, Some(85.0)),
            review(3, Some(90.5)),
        ];
        assert_eq!(average_composite(&reviews), Some(85.17));
    }

    #[test]
    fn test_per_dimension_averages_unweighted() {
        let dims = vec![dimension(1, "A", 0.6), dimension(2, "B", 0.4)];
        let details = vec![
            detail(1, 1, 80.0),
            detail(1, 2, 90.0),
            detail(2, 1, 70.0),
            detail(2, 2, 100.0),
        ];
        let averages = per_dimension_averages(&dims, &details);
        assert_eq!(averages.len(), 2);
        // 权重不参与维度平均
        assert_eq!(averages[0].average, 75.0);
        assert_eq!(averages[1].average, 95.0);
    }

    #[test]
    fn test_per_dimension_averages_skips_unscored_dimensions() {
        let dims = vec![dimension(1, "A", 0.5), dimension(2, "B", 0.5)];
        let details = vec![detail(1, 1, 60.0)];
        let averages = per_dimension_averages(&dims, &details);
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].dimension_id, 1);
    }

    #[test]
    fn test_round2() {
        // 70.125 可被二进制精确表示，round 远离零 → 70.13
        assert_eq!(round2(70.125), 70.13);
        assert_eq!(round2(84.0), 84.0);
        assert_eq!(round2(85.16666), 85.17);
    }
}
