//! Static fixture data backing the in-memory degraded mode.
//!
//! These records pre-date synthetic key assignment, so they keep their
//! original short string keys; handlers accept those keys as valid
//! lookups against the in-memory store.

use crate::db::schemas::asset::{AssetCategory, AssetDoc, AssetStatus};
use crate::db::schemas::competitor::CompetitorDoc;
use crate::db::schemas::expense::{ExpenseDoc, ExpenseStatus};
use crate::db::schemas::idea::IdeaDoc;
use crate::db::schemas::milestone::MilestoneDoc;
use crate::db::schemas::task::{TaskDoc, TaskPriority, TaskStatus};
use crate::db::schemas::{Metadata, RecordId};

fn key(id: &str) -> Option<RecordId> {
    Some(RecordId::Key(id.to_string()))
}

pub fn tasks() -> Vec<TaskDoc> {
    vec![
        TaskDoc {
            id: key("1"),
            metadata: Metadata::new(),
            title: "تجهيز استوديو التسجيل".into(),
            description: "تركيب العزل الصوتي وضبط الإضاءة".into(),
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            assignee: "أحمد".into(),
        },
        TaskDoc {
            id: key("2"),
            metadata: Metadata::new(),
            title: "كتابة سيناريو الدرس الأول".into(),
            description: "مقدمة المساق مع أمثلة عملية".into(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            assignee: "سارة".into(),
        },
        TaskDoc {
            id: key("3"),
            metadata: Metadata::new(),
            title: "مراجعة مونتاج الفيديو التعريفي".into(),
            description: String::new(),
            status: TaskStatus::Done,
            priority: TaskPriority::Low,
            assignee: "خالد".into(),
        },
    ]
}

pub fn assets() -> Vec<AssetDoc> {
    vec![
        AssetDoc {
            id: key("1"),
            metadata: Metadata::new(),
            name: "كاميرا سوني A7 IV".into(),
            category: AssetCategory::Electronics,
            price: 9800.0,
            status: AssetStatus::Received,
            owner: "أحمد".into(),
            note: "العدسة الأساسية مشمولة".into(),
        },
        AssetDoc {
            id: key("2"),
            metadata: Metadata::new(),
            name: "إضاءة سوفت بوكس".into(),
            category: AssetCategory::Production,
            price: 1200.0,
            status: AssetStatus::Ordered,
            owner: "خالد".into(),
            note: String::new(),
        },
        AssetDoc {
            id: key("3"),
            metadata: Metadata::new(),
            name: "ترخيص أدوبي بريمير".into(),
            category: AssetCategory::Licenses,
            price: 950.0,
            status: AssetStatus::ToBuy,
            owner: "سارة".into(),
            note: "اشتراك سنوي".into(),
        },
    ]
}

pub fn expenses() -> Vec<ExpenseDoc> {
    vec![
        ExpenseDoc {
            id: key("1"),
            metadata: Metadata::new(),
            name: "اشتراك زوم".into(),
            category: "برمجيات".into(),
            amount: 60.0,
            status: ExpenseStatus::Active,
            note: "خطة شهرية".into(),
        },
        ExpenseDoc {
            id: key("2"),
            metadata: Metadata::new(),
            name: "فاتورة الإنترنت".into(),
            category: "مرافق".into(),
            amount: 150.0,
            status: ExpenseStatus::Active,
            note: String::new(),
        },
        ExpenseDoc {
            id: key("3"),
            metadata: Metadata::new(),
            name: "استضافة الموقع".into(),
            category: "أخرى".into(),
            amount: 40.0,
            status: ExpenseStatus::Paused,
            note: "قيد المقارنة مع مزود آخر".into(),
        },
    ]
}

pub fn milestones() -> Vec<MilestoneDoc> {
    vec![
        MilestoneDoc {
            id: key("1"),
            metadata: Metadata::new(),
            phase: "التأسيس".into(),
            description: "تجهيز الاستوديو والمعدات".into(),
            start_date: "2025-06-01".into(),
            end_date: "2025-08-31".into(),
            is_complete: true,
            is_current: false,
        },
        MilestoneDoc {
            id: key("2"),
            metadata: Metadata::new(),
            phase: "الإنتاج".into(),
            description: "تسجيل ومونتاج الدروس الأولى".into(),
            start_date: "2025-09-01".into(),
            end_date: "2026-01-31".into(),
            is_complete: false,
            is_current: true,
        },
        MilestoneDoc {
            id: key("3"),
            metadata: Metadata::new(),
            phase: "الإطلاق".into(),
            description: "فتح التسجيل للطلاب".into(),
            start_date: "2026-02-01".into(),
            end_date: "2026-03-15".into(),
            is_complete: false,
            is_current: false,
        },
    ]
}

pub fn ideas() -> Vec<IdeaDoc> {
    vec![
        IdeaDoc {
            id: key("1"),
            metadata: Metadata::new(),
            title: "قناة يوتيوب للمحتوى المجاني".into(),
            content: "مقاطع قصيرة من الدروس لجذب الطلاب".into(),
            category: "تسويق".into(),
            color: "#f5c518".into(),
            created_at: None,
        },
        IdeaDoc {
            id: key("2"),
            metadata: Metadata::new(),
            title: "عروض تجريبية مجانية".into(),
            content: "أول درس من كل مساق متاح بدون تسجيل".into(),
            category: "منتج".into(),
            color: "#4c9aff".into(),
            created_at: None,
        },
    ]
}

pub fn competitors() -> Vec<CompetitorDoc> {
    vec![
        CompetitorDoc {
            id: key("1"),
            metadata: Metadata::new(),
            name: "أكاديمية المنصة".into(),
            logo_url: String::new(),
            strengths: vec!["مكتبة مساقات كبيرة".into(), "علامة معروفة".into()],
            weaknesses: vec!["جودة إنتاج متفاوتة".into()],
            url: "https://example.com/academy".into(),
            rich_notes: String::new(),
            images: vec![],
        },
        CompetitorDoc {
            id: key("2"),
            metadata: Metadata::new(),
            name: "منصة تدرب".into(),
            logo_url: String::new(),
            strengths: vec!["أسعار منخفضة".into()],
            weaknesses: vec!["بدون متابعة فردية".into(), "محتوى قديم".into()],
            url: "https://example.com/tadarrab".into(),
            rich_notes: "تركز على الشركات أكثر من الأفراد".into(),
            images: vec![],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_keys_are_legacy_string_keys() {
        for task in tasks() {
            assert!(matches!(task.id, Some(RecordId::Key(_))));
        }
    }

    #[test]
    fn test_one_current_milestone() {
        let current = milestones().iter().filter(|m| m.is_current).count();
        assert_eq!(current, 1);
    }
}
