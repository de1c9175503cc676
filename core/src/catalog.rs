//! Presentation metadata for each student type.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StudentTypeInfo {
    pub emoji: &'static str,
    pub description: &'static str,
    pub characteristics: &'static [&'static str],
    pub advice: &'static str,
    /// CSS hex color used to theme the result card.
    pub color: &'static str,
}

const STUDENT_TYPES: &[(&str, StudentTypeInfo)] = &[
    (
        "Topper",
        StudentTypeInfo {
            emoji: "🏆",
            description: "You are a dedicated and consistent learner!",
            characteristics: &[
                "High study hours and excellent attendance",
                "Completes all assignments on time",
                "Balanced lifestyle with proper sleep",
                "Limited social media usage",
                "No backlogs",
            ],
            advice: "Keep up the excellent work! Your dedication is inspiring.",
            color: "#2ecc71",
        },
    ),
    (
        "Backbencher",
        StudentTypeInfo {
            emoji: "😎",
            description: "You prefer a more relaxed approach to academics.",
            characteristics: &[
                "Low study hours and poor attendance",
                "Often skips assignments",
                "High social media usage",
                "May have backlogs",
                "Needs to improve time management",
            ],
            advice: "Consider increasing study time and attending classes regularly. Small steps can make a big difference!",
            color: "#e74c3c",
        },
    ),
    (
        "Crammer",
        StudentTypeInfo {
            emoji: "📚",
            description: "You are the last-minute learning champion!",
            characteristics: &[
                "Studies intensively before exams",
                "Moderate attendance",
                "Limited daily study routine",
                "May skip regular assignments",
                "No backlogs due to exam cramming",
            ],
            advice: "Try to develop a consistent study routine. Regular practice is more effective than last-minute cramming!",
            color: "#f39c12",
        },
    ),
    (
        "All-Rounder",
        StudentTypeInfo {
            emoji: "⭐",
            description: "You maintain a great balance in all aspects!",
            characteristics: &[
                "Good study hours and attendance",
                "Completes assignments regularly",
                "Moderate social media usage",
                "Maintains healthy sleep schedule",
                "No backlogs",
            ],
            advice: "Excellent balance! You manage academics and personal life well.",
            color: "#3498db",
        },
    ),
];

/// Shown for any label the table does not cover.
pub static FALLBACK: StudentTypeInfo = StudentTypeInfo {
    emoji: "🎓",
    description: "Student type predicted successfully!",
    characteristics: &["N/A"],
    advice: "Keep learning!",
    color: "#34495e",
};

/// Labels with a dedicated entry, in table order.
pub fn known_labels() -> impl Iterator<Item = &'static str> {
    STUDENT_TYPES.iter().map(|(label, _)| *label)
}

/// Exact, case-sensitive lookup that falls back to [`FALLBACK`].
pub fn describe(label: &str) -> &'static StudentTypeInfo {
    STUDENT_TYPES
        .iter()
        .find(|(known, _)| *known == label)
        .map_or(&FALLBACK, |(_, info)| info)
}
