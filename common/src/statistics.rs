//! 시세 통계 그래프 선택

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// 연도 선택 범위
pub const FIRST_YEAR: u16 = 2016;
pub const LAST_YEAR: u16 = 2026;
pub const DEFAULT_YEAR: u16 = 2025;

pub const MSG_STATISTICS_FAILED: &str = "데이터를 불러오는 중 오류가 발생했습니다.";

/// 그래프 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraphKind {
    #[default]
    TomatoAnnual,
    StrawberryAnnual,
    TomatoMonthlyWholesale,
    StrawberryMonthlyWholesale,
    TomatoMonthlyRetail,
    StrawberryMonthlyRetail,
}

/// 연도 파라미터 이름
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearParam {
    TomatoYear,
    StrawberryYear,
    TomatoYearRetail,
    StrawberryYearRetail,
}

impl YearParam {
    pub fn name(&self) -> &'static str {
        match self {
            YearParam::TomatoYear => "tomato_year",
            YearParam::StrawberryYear => "strawberry_year",
            YearParam::TomatoYearRetail => "tomato_year_retail",
            YearParam::StrawberryYearRetail => "strawberry_year_retail",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            YearParam::TomatoYear | YearParam::TomatoYearRetail => "토마토 월 선택 연도:",
            YearParam::StrawberryYear | YearParam::StrawberryYearRetail => "딸기 월 선택 연도:",
        }
    }
}

impl GraphKind {
    pub const ALL: [GraphKind; 6] = [
        GraphKind::TomatoAnnual,
        GraphKind::StrawberryAnnual,
        GraphKind::TomatoMonthlyWholesale,
        GraphKind::StrawberryMonthlyWholesale,
        GraphKind::TomatoMonthlyRetail,
        GraphKind::StrawberryMonthlyRetail,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GraphKind::TomatoAnnual => "tomato_annual",
            GraphKind::StrawberryAnnual => "strawberry_annual",
            GraphKind::TomatoMonthlyWholesale => "tomato_monthly_wholesale",
            GraphKind::StrawberryMonthlyWholesale => "strawberry_monthly_wholesale",
            GraphKind::TomatoMonthlyRetail => "tomato_monthly_retail",
            GraphKind::StrawberryMonthlyRetail => "strawberry_monthly_retail",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GraphKind::TomatoAnnual => "토마토 연간 시세",
            GraphKind::StrawberryAnnual => "딸기 연간 시세",
            GraphKind::TomatoMonthlyWholesale => "토마토 월간 도매",
            GraphKind::StrawberryMonthlyWholesale => "딸기 월간 도매",
            GraphKind::TomatoMonthlyRetail => "토마토 월간 소매",
            GraphKind::StrawberryMonthlyRetail => "딸기 월간 소매",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == s)
    }

    /// 월간 그래프만 연도 선택이 있다
    pub fn year_param(&self) -> Option<YearParam> {
        match self {
            GraphKind::TomatoAnnual | GraphKind::StrawberryAnnual => None,
            GraphKind::TomatoMonthlyWholesale => Some(YearParam::TomatoYear),
            GraphKind::StrawberryMonthlyWholesale => Some(YearParam::StrawberryYear),
            GraphKind::TomatoMonthlyRetail => Some(YearParam::TomatoYearRetail),
            GraphKind::StrawberryMonthlyRetail => Some(YearParam::StrawberryYearRetail),
        }
    }
}

/// 선택 가능한 연도 목록
pub fn years() -> impl Iterator<Item = u16> {
    FIRST_YEAR..=LAST_YEAR
}

/// 그래프별 선택 연도
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSelection {
    pub tomato_year: u16,
    pub strawberry_year: u16,
    pub tomato_year_retail: u16,
    pub strawberry_year_retail: u16,
}

impl Default for YearSelection {
    fn default() -> Self {
        Self {
            tomato_year: DEFAULT_YEAR,
            strawberry_year: DEFAULT_YEAR,
            tomato_year_retail: DEFAULT_YEAR,
            strawberry_year_retail: DEFAULT_YEAR,
        }
    }
}

impl YearSelection {
    pub fn get(&self, param: YearParam) -> u16 {
        match param {
            YearParam::TomatoYear => self.tomato_year,
            YearParam::StrawberryYear => self.strawberry_year,
            YearParam::TomatoYearRetail => self.tomato_year_retail,
            YearParam::StrawberryYearRetail => self.strawberry_year_retail,
        }
    }

    /// 범위를 벗어난 연도는 무시
    pub fn set(&mut self, param: YearParam, year: u16) -> bool {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return false;
        }
        let slot = match param {
            YearParam::TomatoYear => &mut self.tomato_year,
            YearParam::StrawberryYear => &mut self.strawberry_year,
            YearParam::TomatoYearRetail => &mut self.tomato_year_retail,
            YearParam::StrawberryYearRetail => &mut self.strawberry_year_retail,
        };
        *slot = year;
        true
    }

    /// 요청 쿼리 (graph + 모든 연도 파라미터)
    pub fn query(&self, graph: GraphKind) -> Vec<(&'static str, String)> {
        vec![
            ("graph", graph.as_str().to_string()),
            ("tomato_year", self.tomato_year.to_string()),
            ("strawberry_year", self.strawberry_year.to_string()),
            ("tomato_year_retail", self.tomato_year_retail.to_string()),
            ("strawberry_year_retail", self.strawberry_year_retail.to_string()),
        ]
    }
}

/// `GET /api/statistics` 응답
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StatisticsResponse {
    pub plot_json: String,
    pub graph_title: String,
}

impl StatisticsResponse {
    /// plot_json(JSON 문자열)을 Plotly figure 값으로 파싱
    pub fn plot(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.plot_json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_kind_strings() {
        for kind in GraphKind::ALL {
            assert_eq!(GraphKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(GraphKind::parse("unknown"), None);
        assert_eq!(GraphKind::default().label(), "토마토 연간 시세");
    }

    #[test]
    fn test_year_param_only_for_monthly() {
        assert_eq!(GraphKind::TomatoAnnual.year_param(), None);
        let param = GraphKind::StrawberryMonthlyRetail.year_param().expect("연도 파라미터 없음");
        assert_eq!(param.name(), "strawberry_year_retail");
        assert_eq!(param.label(), "딸기 월 선택 연도:");
    }

    #[test]
    fn test_years_range() {
        let all: Vec<u16> = years().collect();
        assert_eq!(all.len(), 11);
        assert_eq!(all.first(), Some(&2016));
        assert_eq!(all.last(), Some(&2026));
    }

    #[test]
    fn test_selection_query() {
        let mut selection = YearSelection::default();
        assert!(selection.set(YearParam::TomatoYear, 2020));
        assert!(!selection.set(YearParam::TomatoYear, 2030));
        assert_eq!(selection.get(YearParam::TomatoYear), 2020);

        let query = selection.query(GraphKind::TomatoMonthlyWholesale);
        assert_eq!(query[0], ("graph", "tomato_monthly_wholesale".to_string()));
        assert_eq!(query[1], ("tomato_year", "2020".to_string()));
        assert_eq!(query[2], ("strawberry_year", "2025".to_string()));
    }

    #[test]
    fn test_plot_json_parse() {
        let response: StatisticsResponse = serde_json::from_str(
            r#"{"plot_json": "{\"data\": [], \"layout\": {\"title\": \"t\"}}", "graph_title": "토마토"}"#,
        )
        .expect("역직렬화 실패");
        let plot = response.plot().expect("plot 파싱 실패");
        assert!(plot.get("data").is_some());

        let broken = StatisticsResponse {
            plot_json: "{".into(),
            ..Default::default()
        };
        assert!(broken.plot().is_err());
    }
}
