//! Letter-grade bands for the overall score

use serde::Serialize;

/// One contiguous band of overall scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GradeBand {
    /// Inclusive lower bound
    pub min_score: u32,
    /// Inclusive upper bound
    pub max_score: u32,
    /// Letter grade (e.g. "A+")
    pub letter: &'static str,
    /// Short headline
    pub title: &'static str,
    /// Feedback message
    pub message: &'static str,
}

impl GradeBand {
    /// True if `score` falls inside this band
    pub fn contains(&self, score: u32) -> bool {
        (self.min_score..=self.max_score).contains(&score)
    }
}

/// Bands ordered from best to worst, covering 0..=100 without gaps
pub const GRADE_BANDS: [GradeBand; 7] = [
    GradeBand {
        min_score: 90,
        max_score: 100,
        letter: "A+",
        title: "Outstanding Singer!",
        message: "You have exceptional vocal control and technique. Consider pursuing vocal training or performance!",
    },
    GradeBand {
        min_score: 80,
        max_score: 89,
        letter: "A",
        title: "Excellent Voice!",
        message: "You have strong singing fundamentals. A few small improvements could make you shine even brighter!",
    },
    GradeBand {
        min_score: 70,
        max_score: 79,
        letter: "B+",
        title: "Very Good!",
        message: "You show real singing potential. Focus on your weaker areas to level up your vocals!",
    },
    GradeBand {
        min_score: 60,
        max_score: 69,
        letter: "B",
        title: "Good Effort!",
        message: "You're on the right track! Practice and you'll see significant improvement.",
    },
    GradeBand {
        min_score: 50,
        max_score: 59,
        letter: "C+",
        title: "Getting There!",
        message: "Keep practicing! Focus on pitch accuracy and breath control for quick wins.",
    },
    GradeBand {
        min_score: 40,
        max_score: 49,
        letter: "C",
        title: "Room to Grow!",
        message: "Don't give up! Every singer starts somewhere. Try humming along to your favorite songs!",
    },
    GradeBand {
        min_score: 0,
        max_score: 39,
        letter: "D",
        title: "Keep Trying!",
        message: "Singing is a skill that improves with practice. Start with simple melodies and build up!",
    },
];

/// Band for an overall score, falling back to the lowest band
pub fn grade_for_score(score: u32) -> &'static GradeBand {
    GRADE_BANDS
        .iter()
        .find(|band| band.contains(score))
        .unwrap_or(&GRADE_BANDS[GRADE_BANDS.len() - 1])
}
