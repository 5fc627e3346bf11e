//! Everything the page says: fixed tables rendered as-is.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SectionId {
    About,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Publications,
    Contact,
    Message,
}

impl SectionId {
    pub const ALL: [SectionId; 9] = [
        SectionId::About,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Certifications,
        SectionId::Publications,
        SectionId::Contact,
        SectionId::Message,
    ];
}

pub struct NavItem {
    pub label: &'static str,
    pub section: SectionId,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "About",
        section: SectionId::About,
    },
    NavItem {
        label: "Experience",
        section: SectionId::Experience,
    },
    NavItem {
        label: "Education",
        section: SectionId::Education,
    },
    NavItem {
        label: "Projects",
        section: SectionId::Projects,
    },
    NavItem {
        label: "Skills",
        section: SectionId::Skills,
    },
    NavItem {
        label: "Contact",
        section: SectionId::Contact,
    },
];

pub const OWNER_NAME: &str = "Vignesh Masani";
pub const OWNER_INITIALS: &str = "VM";
pub const TAGLINE: &str = "Full Stack Developer | AI & Data Science Enthusiast";
pub const SUMMARY: &str = "I'm a full-stack developer and AI enthusiast with a passion for \
building intuitive web apps, exploring GenAI, and uncovering insights through data science.";

pub const ROLES: &[&str] = &[
    "Full Stack Developer",
    "AI Enthusiast",
    "Data Science Explorer",
    "Software Developer",
];

pub const RESUME_URL: &str =
    "https://drive.google.com/file/d/1hwe7uo-v0TtPqmqoBDvUNk_iPfMoijZn/view?usp=sharing";
pub const LINKEDIN_URL: &str = "https://www.linkedin.com/in/vigneshmasani/";
pub const GITHUB_URL: &str = "https://github.com/itzmevig";
pub const EMAIL: &str = "vigneshmasani@gmail.com";
pub const PHONE: &str = "+91 8639797417";

pub struct Job {
    pub title: &'static str,
    pub company: &'static str,
    pub linkedin_url: &'static str,
    pub certificate_url: Option<&'static str>,
}

pub const JOBS: &[Job] = &[
    Job {
        title: "Data Science with GenAI",
        company: "Innomatics Labs",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_genai-codereviewapp-innomaticsresearchlabs-activity-7265021597512589313-574Q",
        certificate_url: Some(
            "https://drive.google.com/file/d/1cwRtqpCtLe1_M6SzXY9K4ziZwE3m27nP/view?usp=sharing",
        ),
    },
    Job {
        title: "Python Django Intern",
        company: "Avishkar Tech Solutions",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_attendance-portal-django-python-activity-7270074523702691840-LhdW",
        certificate_url: Some(
            "https://drive.google.com/file/d/1R6xJBvnP0xbtWAHZwpnq6MT3xpJ4Z8qc/view?usp=sharing",
        ),
    },
    Job {
        title: "ML Intern",
        company: "Internship Studio",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_face-recognition-ann-python-activity-7260073128634814464-d4Aw",
        certificate_url: Some(
            "https://drive.google.com/file/d/1hfxu3PZe9UO65GTrbYhCnAA8bLIg2HCi/view?usp=sharing",
        ),
    },
    Job {
        title: "Data Science Intern",
        company: "Hema AI Consulting",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_python-eda-sql-machinelearning-activity-7290348301854062592-z45V",
        certificate_url: None,
    },
];

pub struct Education {
    pub school: &'static str,
    pub period: &'static str,
    pub degree: &'static str,
    pub gpa: &'static str,
    pub courses: &'static [&'static str],
    /// Rotating highlight lines for the campus banner.
    pub highlights: &'static [&'static str],
}

pub const EDUCATION: Education = Education {
    school: "SR University",
    period: "Oct 2022 - May 2026",
    degree: "B.Tech in Computer Science",
    gpa: "GPA: 7.56/10",
    courses: &["Python", "Java", "DSA", "OS", "DBMS"],
    highlights: &[
        "SR University, Warangal",
        "Green campus, modern labs",
        "School of Computer Science",
    ],
};

pub struct Project {
    pub title: &'static str,
    pub description: &'static str,
    pub github_url: &'static str,
    pub linkedin_url: Option<&'static str>,
    pub tags: &'static [&'static str],
}

pub const PROJECTS: &[Project] = &[
    Project {
        title: "Attendance Portal",
        description: "A Django-based web application for managing student attendance with \
user authentication and role-based permissions.",
        github_url: "https://github.com/itzmevig/ATTENDANCE-MANAGEMENT-SYSTEM",
        linkedin_url: None,
        tags: &["Django", "Python", "Web App"],
    },
    Project {
        title: "Face Recognition (ANN)",
        description: "Artificial Neural Network based face recognition system for biometric \
authentication.",
        github_url: "https://github.com/itzmevig/CIT---Face-Recognition-using-ANN",
        linkedin_url: None,
        tags: &["Machine Learning", "ANN", "Computer Vision"],
    },
    Project {
        title: "EDA on EVs",
        description: "Exploratory Data Analysis on electric vehicles dataset to uncover \
insights and trends.",
        github_url: "https://github.com/itzmevig/EDA-Electric-Vehicles",
        linkedin_url: Some(
            "https://www.linkedin.com/posts/vigneshmasani_datascience-exploratorydataanalysis-python-activity-7249311239217000448-J60g",
        ),
        tags: &["Data Science", "Python", "EDA"],
    },
    Project {
        title: "Code Review App",
        description: "AI-powered application that provides code reviews and suggestions to \
improve code quality.",
        github_url: "https://github.com/itzmevig/Code-Review-App",
        linkedin_url: Some(
            "https://www.linkedin.com/posts/vigneshmasani_genai-codereviewapp-innomaticsresearchlabs-activity-7265021597512589313-574Q",
        ),
        tags: &["GenAI", "Python", "Web App"],
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipSize {
    Sm,
    Md,
    Lg,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChipCategory {
    Language,
    Web,
    Tech,
    Db,
    Tool,
    Analytics,
}

pub struct SkillChip {
    pub name: &'static str,
    pub size: ChipSize,
    pub category: ChipCategory,
}

pub const SKILLS: &[SkillChip] = &[
    SkillChip { name: "Python", size: ChipSize::Lg, category: ChipCategory::Language },
    SkillChip { name: "C++", size: ChipSize::Md, category: ChipCategory::Language },
    SkillChip { name: "Java", size: ChipSize::Md, category: ChipCategory::Language },
    SkillChip { name: "C#", size: ChipSize::Sm, category: ChipCategory::Language },
    SkillChip { name: "HTML", size: ChipSize::Md, category: ChipCategory::Web },
    SkillChip { name: "CSS", size: ChipSize::Md, category: ChipCategory::Web },
    SkillChip { name: "JavaScript", size: ChipSize::Md, category: ChipCategory::Web },
    SkillChip { name: "Django", size: ChipSize::Lg, category: ChipCategory::Web },
    SkillChip { name: "ML", size: ChipSize::Lg, category: ChipCategory::Tech },
    SkillChip { name: "Full Stack", size: ChipSize::Lg, category: ChipCategory::Tech },
    SkillChip { name: "AI", size: ChipSize::Md, category: ChipCategory::Tech },
    SkillChip { name: "SQL", size: ChipSize::Md, category: ChipCategory::Db },
    SkillChip { name: "MySQL", size: ChipSize::Md, category: ChipCategory::Db },
    SkillChip { name: "PL/SQL", size: ChipSize::Sm, category: ChipCategory::Db },
    SkillChip { name: "Git", size: ChipSize::Md, category: ChipCategory::Tool },
    SkillChip { name: "VS Code", size: ChipSize::Md, category: ChipCategory::Tool },
    SkillChip { name: "Excel", size: ChipSize::Md, category: ChipCategory::Analytics },
    SkillChip { name: "Power BI", size: ChipSize::Md, category: ChipCategory::Analytics },
];

pub struct Certification {
    pub title: &'static str,
    pub issuer: &'static str,
    pub url: &'static str,
    pub icon: &'static str,
}

pub const CERTIFICATIONS: &[Certification] = &[
    Certification {
        title: "Azure Fundamentals",
        issuer: "Microsoft",
        url: "https://learn.microsoft.com/en-us/users/vigneshmasani/credentials/c3d0daf25e5d51fd",
        icon: "AZ",
    },
    Certification {
        title: "Azure Data Scientist Associate",
        issuer: "Microsoft",
        url: "https://learn.microsoft.com/en-us/users/vigneshmasani/credentials/c9b016db8054694a",
        icon: "DS",
    },
    Certification {
        title: "Azure AI Engineer Associate",
        issuer: "Microsoft",
        url: "https://learn.microsoft.com/en-us/users/vigneshmasani/credentials/d6dd5d523db328a4",
        icon: "AI",
    },
    Certification {
        title: "Cisco Intro to Networks",
        issuer: "Cisco",
        url: "https://www.credly.com/badges/d2898bfb-5220-49a1-bb3b-1655fbe5dc6a/public_url",
        icon: "NW",
    },
    Certification {
        title: "Cisco Routing & Switching",
        issuer: "Cisco",
        url: "https://www.credly.com/badges/41a48cc7-cde9-4dc7-ba06-fc12df7a20fe/public_url",
        icon: "RS",
    },
    Certification {
        title: "Fortinet Cybersecurity",
        issuer: "Fortinet",
        url: "https://www.credly.com/badges/1f75307d-0f57-4f6a-8444-e3d72fe3a6b2/public_url",
        icon: "SEC",
    },
    Certification {
        title: "AWS Cloud Foundations",
        issuer: "Amazon Web Services",
        url: "https://www.credly.com/badges/994ce6de-b4b1-41f7-ade8-6b7da40a6fd8/public_url",
        icon: "AWS",
    },
];

pub struct Publication {
    pub title: &'static str,
    pub url: &'static str,
    pub linkedin_url: &'static str,
    pub date: &'static str,
}

pub const PUBLICATIONS: &[Publication] = &[
    Publication {
        title: "Text Mining",
        url: "https://medium.com/@vigneshmasani/unlocking-insights-the-magic-of-text-mining-in-the-digital-age-fb12a8e28764",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_unlocking-insights-the-magic-of-text-mining-activity-7282674503216779264-f8st",
        date: "2024-05-01",
    },
    Publication {
        title: "Chunking Techniques",
        url: "https://lnkd.in/gJi3dKnM",
        linkedin_url: "https://www.linkedin.com/posts/vigneshmasani_the-role-of-chunking-in-problem-solving-and-activity-7299316352148770816-1sRe",
        date: "2024-05-15",
    },
];

pub struct ContactLink {
    pub label: &'static str,
    pub value: &'static str,
    pub url: &'static str,
}

pub const CONTACTS: &[ContactLink] = &[
    ContactLink {
        label: "Email",
        value: EMAIL,
        url: "mailto:vigneshmasani@gmail.com",
    },
    ContactLink {
        label: "Phone",
        value: PHONE,
        url: "tel:+918639797417",
    },
    ContactLink {
        label: "GitHub",
        value: "github.com/itzmevig",
        url: "https://github.com/itzmevig",
    },
    ContactLink {
        label: "LinkedIn",
        value: "linkedin.com/in/vigneshmasani",
        url: "https://www.linkedin.com/in/vigneshmasani/",
    },
    ContactLink {
        label: "Resume",
        value: "View Resume",
        url: RESUME_URL,
    },
];

/// Hosted form relay that forwards submissions as email.
pub const RELAY_ENDPOINT: &str = "https://formsubmit.co/vigneshmasani@gmail.com";
pub const FORM_SUBJECT: &str = "New message from portfolio!";
pub const FORM_NEXT: &str = "https://itzmevig.github.io/";

/// There is no browser to hand links to; surface them in the log instead.
pub fn open_link(url: &str) {
    log::info!("open: {url}");
}
