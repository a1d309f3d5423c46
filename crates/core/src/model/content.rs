//! Portfolio copy. Hard-coded on purpose: it is the page's content, not
//! configuration.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}

pub const PROJECTS: [Project; 4] = [
    Project {
        title: "Project Alpha",
        description: "A revolutionary web application that pushes the boundaries of modern design and functionality.",
        tags: &["React", "TypeScript", "Three.js"],
    },
    Project {
        title: "Stellar Interface",
        description: "An immersive user experience designed for the next generation of digital explorers.",
        tags: &["Next.js", "Framer Motion", "Tailwind"],
    },
    Project {
        title: "Nebula Engine",
        description: "High-performance graphics engine for creating stunning visual experiences.",
        tags: &["WebGL", "GLSL", "Canvas"],
    },
    Project {
        title: "Cosmic Dashboard",
        description: "Data visualization platform that transforms complex data into beautiful insights.",
        tags: &["D3.js", "Node.js", "PostgreSQL"],
    },
];

pub mod welcome {
    pub const KICKER: &str = "Initiating sequence";
    pub const GREETING: &str = "Hi,";
    pub const TITLE: &str = "Welcome";
    pub const BLURB: &str =
        "Prepare for an interstellar journey through my universe of projects and experiences.";
    pub const SCROLL_HINT: &str = "Scroll to launch";
}

pub mod warp {
    pub const KICKER: &str = "Engaging Warp Drive";
    pub const TITLE: &str = "WARP";
    pub const SPEED_UNIT: &str = "km/s";
    pub const LIGHT_SPEED_UNIT: &str = "Light Speed";
    pub const ANOMALY: &str = "⚠ GRAVITATIONAL ANOMALY DETECTED ⚠";
    /// Speed of light in km/s.
    pub const LIGHT_SPEED_KMS: f64 = 299_792.0;
}

pub mod black_hole {
    pub const WARNING: &str = "⚠ Warning: Event Horizon Approaching ⚠";
    pub const TITLE: &str = "BLACK HOLE";
    pub const BLURB: &str = "The gravitational pull is irresistible. But there's something else here...";
    pub const DISTANCE_CAPTION: &str = "Distance to Event Horizon";
    pub const HINT: &str = "A planet orbits nearby... scroll to investigate →";
}

pub mod planet {
    pub const KICKER: &str = "Orbiting Planet Nova";
    pub const TITLE: &str = "My Projects";
    pub const BLURB: &str =
        "Discoveries made during my journey through the cosmos of code and creativity.";
    pub const CALL_TO_ACTION: &str = "View All Projects";
}

pub mod void {
    pub const STATUS: &str = "The Event Horizon // 100% Complete";
    pub const HEADLINE: &str = "Let's build";
    pub const HEADLINE_LEAD: &str = "the ";
    pub const HEADLINE_ACCENT: &str = "future.";
    pub const BLURB: &str = "The journey doesn't end here. I am currently open for new collaborations starting Q1 2025.";
    pub const EMAIL: &str = "hello@portfolio.design";
    pub const AVAILABILITY: &str = "Available for work";
    pub const FOOTER: &str = "© 2024 Design. Made in Space.";
    pub const LOCATION: &str = "Singularity, Null";
    pub const OFFLINE: &str = "System Offline";
}
