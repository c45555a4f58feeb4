use leptos::prelude::*;
use leptos_meta::Title;

use super::sections::{About, Footer, Hero, Navbar, Projects, Services, Skills};

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <Title text="Portfolio" />
        <Navbar />
        <Hero />
        <About />
        <Skills />
        <Projects />
        <Services />
        <Footer />
    }
}
