//! Static marketing pages.

use super::Tab;

pub const LOGO: &str = "📝 ResumeScreen.AI";
pub const FOOTER: &str = "2023 ResumeScreen.AI · Made for College Project";

const HOME: &str = "\
Welcome to ResumeScreen.AI
Your AI-powered tool for smart, fast, and accurate resume screening.";

const ABOUT: &str = "\
About ResumeScreen.AI
We help recruiters find the right candidates faster. Upload a resume with a job
description and get an instant match score, or search every resume you have
already screened by keyword.";

const SERVICES: &str = "\
Services
  - Resume Parsing & Extraction
  - AI-Powered Candidate Matching
  - Keyword & Skill Search
  - Analytics Dashboard";

const CONTACT: &str = "\
Contact Us
Email: info@resumescreen.ai
Phone: +1 234 567 8900
Address: 123 AI Lane, Tech City";

const LANDING: &str = "\
PLAN. LAUNCH. GROW.
We are team of talented designers making websites with Bootstrap
[Get Started]  [Watch Video]";

/// Body text for a static tab; `None` for the interactive ones.
pub fn static_page(tab: Tab) -> Option<&'static str> {
    match tab {
        Tab::Home => Some(HOME),
        Tab::About => Some(ABOUT),
        Tab::Services => Some(SERVICES),
        Tab::Contact => Some(CONTACT),
        Tab::Landing => Some(LANDING),
        Tab::Screen | Tab::Search | Tab::History => None,
    }
}

pub fn not_found(path: &str) -> String {
    format!("Page not found: {path}")
}
