//! 订阅套餐模型
//!
//! MCQ 批改配额以及定价页的套餐目录

use phf::phf_map;

/// 各套餐每次批量分析允许的答题卡数量
///
/// 未知套餐一律视为 0（即功能不可用）
static MCQ_QUOTAS: phf::Map<&'static str, usize> = phf_map! {
    "free" => 0,
    "basic" => 0,
    "standard" => 200,
    "premium" => 500,
};

/// 查询套餐的 MCQ 分析配额
///
/// 套餐名大小写不敏感；未识别的套餐返回 0
pub fn mcq_quota(plan: &str) -> usize {
    MCQ_QUOTAS
        .get(plan.to_lowercase().as_str())
        .copied()
        .unwrap_or(0)
}

/// 订阅套餐描述（定价信息）
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionPlan {
    pub name: &'static str,
    pub price: &'static str,
    pub duration: &'static str,
    pub pages: &'static str,
    pub features: &'static [&'static str],
}

impl SubscriptionPlan {
    /// 该套餐是否包含 MCQ 分析能力
    pub fn supports_mcq(&self) -> bool {
        mcq_quota(self.name) > 0
    }
}

/// 全部订阅套餐
pub static SUBSCRIPTION_PLANS: [SubscriptionPlan; 4] = [
    SubscriptionPlan {
        name: "Free",
        price: "$0",
        duration: "7 days",
        pages: "200",
        features: &[
            "Basic mistake detection",
            "Grammar & spelling check",
            "Limited language support",
            "200 pages analysis",
        ],
    },
    SubscriptionPlan {
        name: "Basic",
        price: "$10",
        duration: "per month",
        pages: "1,500",
        features: &[
            "Advanced mistake detection",
            "Multiple languages",
            "Grammar & spelling check",
            "Email support",
            "1,500 pages analysis",
        ],
    },
    SubscriptionPlan {
        name: "Standard",
        price: "$22",
        duration: "per month",
        pages: "5,000",
        features: &[
            "All Basic features",
            "200 MCQ analysis",
            "Priority processing",
            "Detailed reports",
            "Phone support",
            "5,000 pages analysis",
        ],
    },
    SubscriptionPlan {
        name: "Premium",
        price: "$30",
        duration: "per month",
        pages: "10,000",
        features: &[
            "All Standard features",
            "500 MCQ analysis",
            "Answer key comparison",
            "Bulk processing",
            "API access",
            "24/7 support",
            "10,000 pages analysis",
        ],
    },
];

/// 列出支持 MCQ 分析的套餐
pub fn mcq_capable_plans() -> impl Iterator<Item = &'static SubscriptionPlan> {
    SUBSCRIPTION_PLANS.iter().filter(|p| p.supports_mcq())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_case_insensitive() {
        assert_eq!(mcq_quota("standard"), 200);
        assert_eq!(mcq_quota("Standard"), 200);
        assert_eq!(mcq_quota("STANDARD"), 200);
        assert_eq!(mcq_quota("premium"), 500);
    }

    #[test]
    fn test_quota_unknown_plan_is_zero() {
        assert_eq!(mcq_quota("free"), 0);
        assert_eq!(mcq_quota("basic"), 0);
        assert_eq!(mcq_quota("enterprise"), 0);
        assert_eq!(mcq_quota(""), 0);
    }

    #[test]
    fn test_catalog_quotas_agree() {
        // 定价目录中宣传的 MCQ 配额与查询函数保持一致
        assert!(!SUBSCRIPTION_PLANS[0].supports_mcq());
        assert!(!SUBSCRIPTION_PLANS[1].supports_mcq());
        assert!(SUBSCRIPTION_PLANS[2].supports_mcq());
        assert!(SUBSCRIPTION_PLANS[3].supports_mcq());
        assert_eq!(mcq_capable_plans().count(), 2);
    }
}
