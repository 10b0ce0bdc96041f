//! 작물 도감 (작물 / 병해 / 해충 / 천적)
//!
//! 상세 레코드는 [`EncyclopediaEntry`]로 같은 방식(제목, 라벨:값 목록, 이미지)으로 그린다.
//! HTML 텍스트 필드는 [`html_to_text`]로 변환된다.

use crate::text::{html_to_text, NO_INFO};
use serde::Deserialize;

/// 작물 대표 이미지
pub const CROP_IMAGES: &[(&str, &str)] = &[
    (
        "strawberry",
        "https://cdn.pixabay.com/photo/2018/04/29/11/54/strawberries-3359755_1280.jpg",
    ),
    (
        "tomato",
        "https://cdn.pixabay.com/photo/2016/03/26/16/44/tomatoes-1280859_1280.jpg",
    ),
];

/// 작물 id → 한글 이름. 모르는 id는 그대로
pub fn crop_name_kor(crop: &str) -> &str {
    match crop {
        "strawberry" => "딸기",
        "tomato" => "완숙 토마토",
        other => other,
    }
}

pub fn crop_image(crop: &str) -> Option<&'static str> {
    CROP_IMAGES
        .iter()
        .find(|(id, _)| *id == crop)
        .map(|(_, url)| *url)
}

/// 재배 정보
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropInfoRecord {
    pub season: Option<String>,
    pub temp: Option<serde_json::Value>,
    pub humidity: Option<serde_json::Value>,
}

impl CropInfoRecord {
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("재배 시기", self.season.clone().unwrap_or_default()),
            ("적정 온도", format!("{}℃", display_value(self.temp.as_ref()))),
            ("적정 습도", format!("{}%", display_value(self.humidity.as_ref()))),
        ]
    }
}

fn display_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiseaseSummary {
    pub sick_key: String,
    pub sick_name_kor: String,
    pub thumb_img: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsectSummary {
    pub insect_key: String,
    pub insect_kor_name: String,
    pub thumb_img: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnemySummary {
    pub insect_key: String,
    pub insect_species_kor: String,
    pub thumb_img: Option<String>,
}

/// `GET /api/crops/detail/{crop}` 응답
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CropDetail {
    pub info: CropInfoRecord,
    pub items: Vec<DiseaseSummary>,
    pub insects: Vec<InsectSummary>,
    pub enemies: Vec<EnemySummary>,
}

/// 목록 카드 항목 (상세 페이지 경로, 이름, 썸네일)
#[derive(Debug, Clone, PartialEq)]
pub struct CardItem {
    pub kind: EntryKind,
    pub key: String,
    pub name: String,
    pub thumb: Option<String>,
}

impl CardItem {
    pub fn href(&self) -> String {
        format!("/encyclopedia/{}/{}", self.kind.as_str(), self.key)
    }
}

impl CropDetail {
    pub fn disease_cards(&self) -> Vec<CardItem> {
        self.items
            .iter()
            .map(|d| CardItem {
                kind: EntryKind::Disease,
                key: d.sick_key.clone(),
                name: d.sick_name_kor.clone(),
                thumb: d.thumb_img.clone(),
            })
            .collect()
    }

    pub fn insect_cards(&self) -> Vec<CardItem> {
        self.insects
            .iter()
            .map(|i| CardItem {
                kind: EntryKind::Insect,
                key: i.insect_key.clone(),
                name: i.insect_kor_name.clone(),
                thumb: i.thumb_img.clone(),
            })
            .collect()
    }

    pub fn enemy_cards(&self) -> Vec<CardItem> {
        self.enemies
            .iter()
            .map(|e| CardItem {
                kind: EntryKind::Enemy,
                key: e.insect_key.clone(),
                name: e.insect_species_kor.clone(),
                thumb: e.thumb_img.clone(),
            })
            .collect()
    }

    /// (섹션 제목, 카드 목록, 비었을 때 문구)
    pub fn sections(&self) -> Vec<(&'static str, Vec<CardItem>, &'static str)> {
        vec![
            ("병해 목록", self.disease_cards(), "병해 정보가 없습니다."),
            ("해충 피해", self.insect_cards(), "해충 정보가 없습니다."),
            ("천적 곤충", self.enemy_cards(), "천적 곤충 정보가 없습니다."),
        ]
    }
}

/// 상세 레코드 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Disease,
    Insect,
    Enemy,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Disease => "disease",
            EntryKind::Insect => "insect",
            EntryKind::Enemy => "enemy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "disease" => Some(EntryKind::Disease),
            "insect" => Some(EntryKind::Insect),
            "enemy" => Some(EntryKind::Enemy),
            _ => None,
        }
    }

    /// 불러오기 실패 문구
    pub fn load_error(&self) -> &'static str {
        match self {
            EntryKind::Disease => "병해 정보를 불러올 수 없습니다.",
            EntryKind::Insect => "해충 정보를 불러올 수 없습니다.",
            EntryKind::Enemy => "천적 정보를 불러올 수 없습니다.",
        }
    }
}

/// 상세 이미지
#[derive(Debug, Clone, PartialEq)]
pub struct EntryImage {
    pub src: String,
    pub alt: String,
}

/// 도감 상세 레코드 공통 인터페이스
pub trait EncyclopediaEntry {
    const KIND: EntryKind;

    fn title(&self) -> String;

    /// 정보 섹션 제목 ("병해 정보" 등)
    fn section_title(&self) -> &'static str;

    /// 라벨과 표시 문자열 (줄바꿈 변환 후)
    fn fields(&self) -> Vec<(&'static str, String)>;

    fn images_title(&self) -> &'static str;

    fn images(&self) -> Vec<EntryImage>;
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ImageRecord {
    pub image: String,
    #[serde(rename = "imageTitle")]
    pub image_title: Option<String>,
}

/// `GET /api/diseases/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiseaseRecord {
    pub sick_name_kor: Option<String>,
    pub development_condition: Option<String>,
    pub prevention_method: Option<String>,
    pub symptoms: Option<String>,
    pub image_list: Vec<ImageRecord>,
}

impl EncyclopediaEntry for DiseaseRecord {
    const KIND: EntryKind = EntryKind::Disease;

    fn title(&self) -> String {
        self.sick_name_kor.clone().unwrap_or_default()
    }

    fn section_title(&self) -> &'static str {
        "병해 정보"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("병명", self.sick_name_kor.clone().unwrap_or_default()),
            ("전파 경로", html_to_text(self.development_condition.as_deref())),
            ("예방법", html_to_text(self.prevention_method.as_deref())),
            ("증상", html_to_text(self.symptoms.as_deref())),
        ]
    }

    fn images_title(&self) -> &'static str {
        "병해 이미지"
    }

    fn images(&self) -> Vec<EntryImage> {
        self.image_list
            .iter()
            .map(|img| EntryImage {
                src: img.image.clone(),
                alt: img.image_title.clone().unwrap_or_else(|| self.title()),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhotoRecord {
    pub image: String,
}

/// `GET /api/insects/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InsectRecord {
    pub insect_species_kor: Option<String>,
    pub ecology_info: Option<String>,
    pub damage_info: Option<String>,
    pub prevent_method: Option<String>,
    pub qrant_info: Option<String>,
    pub distrb_info: Option<String>,
    pub stle_info: Option<String>,
    pub spcs_photo_data: Vec<PhotoRecord>,
}

impl EncyclopediaEntry for InsectRecord {
    const KIND: EntryKind = EntryKind::Insect;

    fn title(&self) -> String {
        non_empty(self.insect_species_kor.as_deref()).unwrap_or("해충 정보 없음").to_string()
    }

    fn section_title(&self) -> &'static str {
        "해충 정보"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("해충명", name_or_no_info(self.insect_species_kor.as_deref())),
            ("생태정보", html_to_text(self.ecology_info.as_deref())),
            ("피해정보", html_to_text(self.damage_info.as_deref())),
            ("방제방법", html_to_text(self.prevent_method.as_deref())),
            ("검역정보", html_to_text(self.qrant_info.as_deref())),
            ("분포정보", html_to_text(self.distrb_info.as_deref())),
            ("형태정보", html_to_text(self.stle_info.as_deref())),
        ]
    }

    fn images_title(&self) -> &'static str {
        "해충 이미지"
    }

    fn images(&self) -> Vec<EntryImage> {
        let alt = self.insect_species_kor.clone().unwrap_or_default();
        self.spcs_photo_data
            .iter()
            .map(|photo| EntryImage {
                src: photo.image.clone(),
                alt: alt.clone(),
            })
            .collect()
    }
}

/// `GET /api/enemies/{id}`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnemyRecord {
    pub insect_species_kor: Option<String>,
    pub domestic_distribution: Option<String>,
    pub feature: Option<String>,
    pub life_cycle: Option<String>,
    pub utilization_method: Option<String>,
    pub etc_crop: Option<String>,
}

impl EncyclopediaEntry for EnemyRecord {
    const KIND: EntryKind = EntryKind::Enemy;

    fn title(&self) -> String {
        non_empty(self.insect_species_kor.as_deref())
            .unwrap_or("천적 곤충 정보 없음")
            .to_string()
    }

    fn section_title(&self) -> &'static str {
        "천적 곤충 정보"
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("천적 곤충명", name_or_no_info(self.insect_species_kor.as_deref())),
            ("국내 분포", html_to_text(self.domestic_distribution.as_deref())),
            ("특징", html_to_text(self.feature.as_deref())),
            ("생활사", html_to_text(self.life_cycle.as_deref())),
            ("이용방법", html_to_text(self.utilization_method.as_deref())),
            ("기타 작물", html_to_text(self.etc_crop.as_deref())),
        ]
    }

    fn images_title(&self) -> &'static str {
        "천적 곤충 이미지"
    }

    fn images(&self) -> Vec<EntryImage> {
        Vec::new()
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.is_empty())
}

fn name_or_no_info(s: Option<&str>) -> String {
    non_empty(s).unwrap_or(NO_INFO).to_string()
}
