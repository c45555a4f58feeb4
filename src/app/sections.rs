use chrono::{DateTime, Utc};
use leptos::prelude::*;

use super::contact::ContactRequest;

struct ServiceCard {
    title: &'static str,
    description: &'static str,
    features: [&'static str; 4],
    price: &'static str,
}

static SERVICE_CARDS: [ServiceCard; 4] = [
    ServiceCard {
        title: "Full-Stack Web Development",
        description: "Complete web application development from frontend to backend with modern technologies.",
        features: ["React/Next.js Development", "API Development", "Database Design", "Cloud Deployment"],
        price: "Starting at $5,000",
    },
    ServiceCard {
        title: "Blockchain Development",
        description: "Smart contracts, DeFi protocols, and Web3 application development.",
        features: ["Smart Contract Development", "DeFi Creation", "NFT Marketplace", "Web3 Integration"],
        price: "Starting at $8,000",
    },
    ServiceCard {
        title: "Cybersecurity Consulting",
        description: "Comprehensive security assessments and penetration testing services.",
        features: ["Security Audits", "Penetration Testing", "Vulnerability Assessment", "Security Training"],
        price: "Starting at $3,000",
    },
    ServiceCard {
        title: "Technical Consulting",
        description: "Architecture design, code review, and technical strategy consultation.",
        features: ["Architecture Review", "Code Auditing", "Performance Optimization", "Team Training"],
        price: "Starting at $2,000",
    },
];

static SKILL_GROUPS: [(&str, &[&str]); 4] = [
    ("Frontend", &["React", "Next.js", "TypeScript", "Tailwind CSS"]),
    ("Backend", &["Node.js", "Python", "Express.js", "Django"]),
    ("Blockchain", &["Solidity", "Web3.js", "Smart Contracts", "Ethereum"]),
    (
        "Security",
        &["Penetration Testing", "Network Security", "Cryptography", "Security Auditing"],
    ),
];

static PROJECTS: [(&str, &str); 6] = [
    ("DeFi Trading Platform", "Decentralized exchange with automated market making."),
    ("Security Audit Dashboard", "Continuous vulnerability tracking for web applications."),
    ("E-commerce Microservices", "Order, payment, and inventory services behind one gateway."),
    ("NFT Marketplace", "Minting, listing, and auctions on Ethereum."),
    ("Penetration Testing Suite", "Scripted reconnaissance and reporting toolkit."),
    ("Real-time Chat Application", "WebSocket messaging with presence and history."),
];

const SPECIALIZATIONS: [&str; 3] = [
    "Full-Stack Developer",
    "Blockchain Expert",
    "Cybersecurity Specialist",
];

#[component]
pub fn Navbar() -> impl IntoView {
    let request = expect_context::<ContactRequest>();
    view! {
        <nav class="sticky top-0 z-40 backdrop-blur bg-white/70 dark:bg-slate-900/70 shadow">
            <div class="mx-auto max-w-6xl px-4 py-3 flex items-center justify-between">
                <a href="/" class="text-xl font-bold">"DevMaster"</a>
                <div class="flex items-center gap-6 text-sm">
                    <a href="#about">"About"</a>
                    <a href="#skills">"Skills"</a>
                    <a href="#projects">"Projects"</a>
                    <a href="#services">"Services"</a>
                    <button
                        class="px-4 py-2 rounded-md text-white bg-blue-600 dark:bg-cyan-500"
                        on:click=move |_| request.open(None)
                    >
                        "Hire Me"
                    </button>
                </div>
            </div>
        </nav>
    }
}

#[component]
pub fn Hero() -> impl IntoView {
    let request = expect_context::<ContactRequest>();
    view! {
        <section class="min-h-[70vh] flex items-center px-4">
            <div class="mx-auto max-w-6xl">
                <h1 class="text-4xl lg:text-5xl font-bold mb-4">"Hi, I'm Muhammad Shah"</h1>
                <p class="text-2xl font-semibold text-blue-600 dark:text-cyan-400 mb-6">
                    {SPECIALIZATIONS.join(" · ")}
                </p>
                <p class="text-lg text-slate-600 dark:text-slate-300 mb-8 max-w-2xl">
                    "I build secure, scalable web applications and smart contracts, and help teams ship them with confidence."
                </p>
                <div class="flex flex-wrap gap-4">
                    <button
                        class="px-6 py-3 rounded-md text-white bg-blue-600 dark:bg-cyan-500"
                        on:click=move |_| request.open(None)
                    >
                        "Get In Touch →"
                    </button>
                    <a
                        href="https://github.com/mistershah-numl"
                        target="_blank"
                        rel="noopener noreferrer"
                        class="px-6 py-3 rounded-md border border-slate-300 dark:border-slate-600"
                    >
                        "View GitHub"
                    </a>
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn About() -> impl IntoView {
    view! {
        <section id="about" class="py-20 px-4">
            <div class="mx-auto max-w-4xl">
                <h2 class="text-3xl font-bold mb-6">"About Me"</h2>
                <p class="text-base mb-4 leading-relaxed">
                    "Full-stack engineer working across web platforms, blockchain protocols, and application security."
                </p>
                <p class="text-base leading-relaxed">
                    "I care about clean architecture, measurable performance, and code that survives an audit."
                </p>
            </div>
        </section>
    }
}

#[component]
pub fn Skills() -> impl IntoView {
    view! {
        <section id="skills" class="py-20 px-4">
            <div class="mx-auto max-w-6xl">
                <h2 class="text-3xl font-bold mb-8 text-center">"Skills"</h2>
                <div class="grid md:grid-cols-2 lg:grid-cols-4 gap-6">
                    {SKILL_GROUPS
                        .iter()
                        .map(|(group, skills)| {
                            view! {
                                <div class="p-4 rounded-lg border border-slate-200 dark:border-slate-700">
                                    <h3 class="font-semibold mb-2">{*group}</h3>
                                    <ul class="text-sm space-y-1">
                                        {skills
                                            .iter()
                                            .map(|s| view! { <li>{*s}</li> })
                                            .collect_view()}
                                    </ul>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Projects() -> impl IntoView {
    view! {
        <section id="projects" class="py-20 px-4">
            <div class="mx-auto max-w-6xl">
                <h2 class="text-3xl font-bold mb-8 text-center">"Projects"</h2>
                <div class="grid md:grid-cols-2 lg:grid-cols-3 gap-6">
                    {PROJECTS
                        .iter()
                        .map(|(title, blurb)| {
                            view! {
                                <div class="p-4 rounded-lg border border-slate-200 dark:border-slate-700">
                                    <h3 class="font-semibold">{*title}</h3>
                                    <p class="text-sm text-slate-600 dark:text-slate-300">
                                        {*blurb}
                                    </p>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

#[component]
pub fn Services() -> impl IntoView {
    let request = expect_context::<ContactRequest>();
    view! {
        <section id="services" class="py-20 px-4">
            <div class="mx-auto max-w-6xl">
                <h2 class="text-3xl font-bold mb-8 text-center">"Services"</h2>
                <div class="grid md:grid-cols-2 gap-6">
                    {SERVICE_CARDS
                        .iter()
                        .map(|card| {
                            let title = card.title;
                            view! {
                                <div class="p-6 rounded-lg border border-slate-200 dark:border-slate-700 flex flex-col">
                                    <h3 class="text-xl font-semibold mb-2">{title}</h3>
                                    <p class="text-sm mb-4">{card.description}</p>
                                    <ul class="text-sm space-y-1 mb-4">
                                        {card
                                            .features
                                            .iter()
                                            .map(|f| view! { <li>"✓ " {*f}</li> })
                                            .collect_view()}
                                    </ul>
                                    <div class="mt-auto flex items-center justify-between">
                                        <span class="font-medium">{card.price}</span>
                                        <button
                                            class="px-4 py-2 rounded-md text-white bg-blue-600 dark:bg-cyan-500"
                                            on:click=move |_| request.open(Some(title))
                                        >
                                            "Request Service"
                                        </button>
                                    </div>
                                </div>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}

fn build_date() -> String {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|t| t.with_timezone(&Utc).format("%b %e, %Y").to_string())
        .unwrap_or_default()
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="py-10 px-4 bg-slate-900 text-slate-300">
            <div class="mx-auto max-w-6xl flex flex-col md:flex-row justify-between gap-4 text-sm">
                <div>
                    <p class="font-bold text-white">"DevMaster"</p>
                    <p>"Building secure software, end to end."</p>
                </div>
                <div class="flex gap-4">
                    <a href="https://github.com/mistershah-numl" target="_blank" rel="noopener noreferrer">
                        "GitHub"
                    </a>
                    <a
                        href="https://www.linkedin.com/in/muhammadshah786"
                        target="_blank"
                        rel="noopener noreferrer"
                    >
                        "LinkedIn"
                    </a>
                    <a href="#services">"Services"</a>
                </div>
                <p class="text-slate-500">"Last built " {build_date()}</p>
            </div>
        </footer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inquiry::SERVICES;

    #[test]
    fn test_service_cards_are_requestable() {
        for card in &SERVICE_CARDS {
            assert!(SERVICES.contains(&card.title), "{} not offered", card.title);
        }
    }

    #[test]
    fn test_build_date() {
        assert!(!build_date().is_empty());
    }
}
