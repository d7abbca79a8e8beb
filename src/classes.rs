//! Class context descriptors and built-in demo data

use crate::stream::Post;

/// Static descriptor for one class. Read-only reference data; the subject
/// context is forwarded verbatim to the answer backend as domain framing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassContext {
    pub id: String,
    pub name: String,
    pub section: Option<String>,
    pub subject_context: String,
}

impl ClassContext {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        subject_context: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            section: None,
            subject_context: subject_context.into(),
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    /// Display name the AI answer posts are authored under
    pub fn ai_helper_name(&self) -> String {
        format!("{} AI Helper", self.name)
    }
}

/// The demo class roster
pub fn default_classes() -> Vec<ClassContext> {
    vec![
        ClassContext::new(
            "home",
            "Class of 2027",
            "General High School student matters, school announcements, and general advice",
        )
        .with_section("Homeroom"),
        ClassContext::new(
            "spanish",
            "Español 2",
            "Spanish Language, grammar, vocabulary, and culture. Reply in a mix of Spanish and \
             English to help the student learn.",
        )
        .with_section("P.6"),
        ClassContext::new(
            "chemistry",
            "2026 2nd Hr Chemistry B",
            "High School Chemistry, stoichiometry, periodic table, and chemical equations.",
        )
        .with_section("Science Dept"),
        ClassContext::new(
            "economics",
            "1st Economics",
            "High School Economics, supply and demand, macroeconomics, and microeconomics.",
        )
        .with_section("SOC312-7"),
        ClassContext::new(
            "precalc",
            "AP Precalculus",
            "AP Precalculus and preparation for AP Calculus. Cover limits, derivatives, \
             integrals, trigonometry, logarithms, exponential functions, polynomial functions, \
             rational functions, graphing transformations, asymptotes, continuity, rates of \
             change, optimization, related rates, area under curves, and all foundational \
             calculus concepts. Show all work step-by-step with clear mathematical notation.",
        )
        .with_section("Math Dept"),
        ClassContext::new(
            "theatre",
            "IB Theatre Arts 11",
            "Theatre Arts, acting techniques, theatre history, and stage production.",
        )
        .with_section("2027 Cohort"),
    ]
}

/// Hand-authored posts seeding the demo stream
pub fn seed_posts() -> Vec<Post> {
    vec![
        Post::seed(
            "home",
            "Benjamin Hirdler",
            "12:07 PM",
            "Students, please see the following announcement regarding National Honor Society \
             (NHS) and also National Society of High School Scholars (NSHSS):\n\nNational \
             Society of High School Scholars (NSHSS) and Honor Society are not associated with \
             West High in any way. Membership in these groups is not recognized by West High, \
             and any items purchased from these sites are not allowed to be worn at \
             graduation.\n\nNational Honor Society (NHS) is the only organization that we work \
             with to recognize academic achievement. The national organization for NHS will not \
             reach out to students asking for money.",
        ),
        Post::seed(
            "spanish",
            "Señor Rodriguez",
            "Yesterday",
            "¡Hola clase! Reminder that your conjugation worksheet for preterite tense is due \
             this Friday.",
        ),
        Post::seed(
            "chemistry",
            "Mrs. White",
            "2 days ago",
            "Please bring your safety goggles tomorrow. We are doing the titration lab.",
        ),
    ]
}
