use leptos::prelude::*;
use leptos_meta::Title;
use leptos_router::components::A;

/// Landing page the form relay redirects to after a plain HTML post.
#[component]
pub fn ThankYou() -> impl IntoView {
    view! {
        <Title text="Thank You" />
        <div class="min-h-screen flex items-center justify-center">
            <div class="text-center">
                <h1 class="text-3xl font-bold">"Thank You!"</h1>
                <p class="text-slate-600 dark:text-slate-300">
                    "Your message has been sent. You'll receive a confirmation email, and I'll get back to you within 24 hours."
                </p>
                <A href="/" attr:class="inline-block mt-6 text-blue-600 dark:text-cyan-400">
                    "← Back to the portfolio"
                </A>
            </div>
        </div>
    }
}
