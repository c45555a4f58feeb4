use leptos::{
    ev::{MouseEvent, SubmitEvent},
    prelude::*,
    server_fn::codec::Json,
    task::spawn_local,
};
use strum::IntoEnumIterator;

#[cfg(feature = "ssr")]
use crate::gateway::FormRelayGateway;
use crate::error::SubmitError;
use crate::form::{ContactForm, RESET_DELAY};
use crate::gateway::SubmissionGateway;
use crate::inquiry::{Budget, Field, Inquiry, Timeline, SERVICES};

/// Shared handle the page uses to open the contact modal.
#[derive(Debug, Clone, Copy)]
pub struct ContactRequest {
    open: RwSignal<bool>,
    service: RwSignal<Option<String>>,
}

impl ContactRequest {
    pub fn new() -> Self {
        Self {
            open: RwSignal::new(false),
            service: RwSignal::new(None),
        }
    }

    pub fn open(&self, service: Option<&str>) {
        self.service.set(service.map(str::to_string));
        self.open.set(true);
    }

    pub fn close(&self) {
        self.open.set(false);
    }
}

impl Default for ContactRequest {
    fn default() -> Self {
        Self::new()
    }
}

#[server(input = Json)]
pub async fn submit_inquiry(inquiry: Inquiry) -> Result<(), ServerFnError> {
    inquiry
        .validate()
        .map_err(|e| ServerFnError::new(e.to_string()))?;
    let gateway = use_context::<FormRelayGateway>()
        .ok_or_else(|| ServerFnError::new("Form relay is not configured"))?;
    gateway
        .post(&inquiry)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

/// Browser side of the gateway: hands the inquiry to the server, which owns the relay key.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerGateway;

/// Transport failures are `Network`; anything the server answered is `Delivery`.
fn submit_error(err: ServerFnError) -> SubmitError {
    match err {
        ServerFnError::Request(msg) => SubmitError::Network(msg),
        other => SubmitError::Delivery(other.to_string()),
    }
}

impl SubmissionGateway for ServerGateway {
    async fn send(&self, inquiry: &Inquiry) -> Result<(), SubmitError> {
        submit_inquiry(inquiry.clone()).await.map_err(submit_error)
    }
}

#[component]
pub fn ContactModal() -> impl IntoView {
    let request = expect_context::<ContactRequest>();
    let on_close = Callback::new(move |_: ()| request.close());

    view! {
        <Show when=move || request.open.get()>
            <div
                class="fixed inset-0 bg-black/50 backdrop-blur-sm z-50 flex items-center justify-center p-4"
                on:click=move |_| request.close()
            >
                <div
                    class="w-full max-w-4xl max-h-[90vh] overflow-y-auto rounded-lg bg-white dark:bg-slate-900 border border-slate-200 dark:border-slate-700"
                    on:click=|ev| ev.stop_propagation()
                >
                    <InquiryForm seed=request.service.get_untracked() on_close />
                </div>
            </div>
        </Show>
    }
}

fn field_id(field: Field) -> &'static str {
    match field {
        Field::Name => "name",
        Field::Email => "email",
        Field::Company => "company",
        Field::Phone => "phone",
        Field::Subject => "subject",
        Field::Message => "message",
    }
}

#[component]
fn TextInput(
    form: RwSignal<ContactForm>,
    field: Field,
    label: &'static str,
    #[prop(default = "text")] kind: &'static str,
    #[prop(optional)] placeholder: &'static str,
    #[prop(optional)] required: bool,
) -> impl IntoView {
    let id = field_id(field);
    view! {
        <div>
            <label for=id class="text-sm font-medium">
                {label}
                {required.then_some(" *")}
            </label>
            <input
                id=id
                type=kind
                required=required
                placeholder=placeholder
                class="mt-1 w-full px-3 py-2 rounded-md border border-slate-300 dark:border-slate-600 dark:bg-slate-800"
                prop:value=move || form.with(|f| f.inquiry().field(field).to_string())
                on:input=move |ev| form.update(|f| f.set_field(field, event_target_value(&ev)))
            />
        </div>
    }
}

#[component]
fn InquiryForm(seed: Option<String>, on_close: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(ContactForm::new(seed.as_deref()));
    let submitting = Memo::new(move |_| form.with(|f| f.is_submitting()));
    let submitted = Memo::new(move |_| form.with(|f| f.is_submitted()));
    let error = Memo::new(move |_| form.with(|f| f.error().map(str::to_string)));

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(Ok(inquiry)) = form.try_update(|f| f.begin_submit()) else {
            return;
        };
        spawn_local(async move {
            let result = ServerGateway.send(&inquiry).await;
            let sent = result.is_ok();
            form.try_update(|f| f.finish_submit(result));
            if sent {
                set_timeout(
                    move || {
                        // the visitor may have closed the modal already
                        if form.try_update(|f| f.acknowledge()).is_some() {
                            on_close.run(());
                        }
                    },
                    RESET_DELAY,
                );
            }
        });
    };

    let close = move |_: MouseEvent| {
        form.update(|f| f.close());
        on_close.run(());
    };

    view! {
        <div class="relative p-6">
            <button
                type="button"
                class="absolute right-4 top-4 text-slate-500 hover:text-slate-800"
                aria-label="Close"
                on:click=close
            >
                "✕"
            </button>
            <h2 class="text-2xl font-bold text-blue-600 dark:text-cyan-400">
                "Let's Work Together"
            </h2>
            <p class="mb-6 text-slate-600 dark:text-slate-300">
                "Tell me about your project and let's create something amazing together."
            </p>
            <Show
                when=move || !submitted.get()
                fallback=|| {
                    view! {
                        <div class="text-center py-12">
                            <h3 class="text-2xl font-semibold mb-2">
                                "Message Sent Successfully! 🎉"
                            </h3>
                            <p class="text-slate-600 dark:text-slate-300">
                                "Thank you for reaching out! You'll receive a confirmation email, and I'll get back to you within 24 hours."
                            </p>
                        </div>
                    }
                }
            >
                <form class="space-y-6" on:submit=on_submit>
                    {move || {
                        error
                            .get()
                            .map(|e| {
                                view! {
                                    <div class="bg-red-50 dark:bg-red-900/20 border border-red-200 dark:border-red-800 rounded-lg p-4">
                                        <p class="text-red-600 dark:text-red-400 text-sm">{e}</p>
                                    </div>
                                }
                            })
                    }}
                    <div class="grid md:grid-cols-2 gap-4">
                        <TextInput
                            form
                            field=Field::Name
                            label="Full Name"
                            placeholder="John Doe"
                            required=true
                        />
                        <TextInput
                            form
                            field=Field::Email
                            label="Email Address"
                            kind="email"
                            placeholder="john@example.com"
                            required=true
                        />
                    </div>
                    <div class="grid md:grid-cols-2 gap-4">
                        <TextInput
                            form
                            field=Field::Company
                            label="Company/Organization"
                            placeholder="Acme Corp"
                        />
                        <TextInput
                            form
                            field=Field::Phone
                            label="Phone Number"
                            kind="tel"
                            placeholder="+1 (555) 123-4567"
                        />
                    </div>
                    <div>
                        <span class="text-base font-semibold">"Services Needed *"</span>
                        <div class="grid md:grid-cols-2 gap-3 mt-3">
                            {SERVICES
                                .iter()
                                .map(|&service| {
                                    view! {
                                        <label class="flex items-center gap-2 text-sm cursor-pointer">
                                            <input
                                                type="checkbox"
                                                prop:checked=move || {
                                                    form.with(|f| f.inquiry().services.contains(service))
                                                }
                                                on:change=move |_| form.update(|f| f.toggle_service(service))
                                            />
                                            {service}
                                        </label>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <Show when=move || form.with(|f| f.inquiry().services.is_empty())>
                            <p class="text-red-500 text-xs mt-1">
                                "Please select at least one service"
                            </p>
                        </Show>
                    </div>
                    <div class="grid md:grid-cols-2 gap-4">
                        <div>
                            <label for="budget" class="text-sm font-medium">
                                "Project Budget"
                            </label>
                            <select
                                id="budget"
                                class="mt-1 w-full px-3 py-2 rounded-md border border-slate-300 dark:border-slate-600 dark:bg-slate-800"
                                prop:value=move || {
                                    form.with(|f| {
                                        f.inquiry().budget.map(|b| b.to_string()).unwrap_or_default()
                                    })
                                }
                                on:change=move |ev| {
                                    form.update(|f| f.set_budget(event_target_value(&ev).parse().ok()))
                                }
                            >
                                <option value="">"Select budget range"</option>
                                {Budget::iter()
                                    .map(|b| {
                                        let label = b.to_string();
                                        view! { <option value=label.clone()>{label.clone()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                        <div>
                            <label for="timeline" class="text-sm font-medium">
                                "Project Timeline"
                            </label>
                            <select
                                id="timeline"
                                class="mt-1 w-full px-3 py-2 rounded-md border border-slate-300 dark:border-slate-600 dark:bg-slate-800"
                                prop:value=move || {
                                    form.with(|f| {
                                        f.inquiry().timeline.map(|t| t.to_string()).unwrap_or_default()
                                    })
                                }
                                on:change=move |ev| {
                                    form.update(|f| f.set_timeline(event_target_value(&ev).parse().ok()))
                                }
                            >
                                <option value="">"Select timeline"</option>
                                {Timeline::iter()
                                    .map(|t| {
                                        let label = t.to_string();
                                        view! { <option value=label.clone()>{label.clone()}</option> }
                                    })
                                    .collect_view()}
                            </select>
                        </div>
                    </div>
                    <TextInput
                        form
                        field=Field::Subject
                        label="Subject"
                        placeholder="E-commerce Website Development"
                        required=true
                    />
                    <div>
                        <label for="message" class="text-sm font-medium">
                            "Project Details *"
                        </label>
                        <textarea
                            id="message"
                            rows="5"
                            required=true
                            class="mt-1 w-full px-3 py-2 rounded-md border border-slate-300 dark:border-slate-600 dark:bg-slate-800"
                            placeholder="Please provide detailed information about your project, requirements, and any specific needs."
                            prop:value=move || form.with(|f| f.inquiry().message.clone())
                            on:input=move |ev| {
                                form.update(|f| f.set_field(Field::Message, event_target_value(&ev)))
                            }
                        ></textarea>
                    </div>
                    <button
                        type="submit"
                        class="w-full py-3 rounded-md font-medium text-white bg-blue-600 hover:bg-blue-700 disabled:opacity-60 dark:bg-cyan-500"
                        prop:disabled=move || submitting.get()
                    >
                        {move || if submitting.get() { "Sending Message..." } else { "Send Message" }}
                    </button>
                    <p class="text-xs text-slate-500 dark:text-slate-400 text-center">
                        "By submitting this form, you agree to receive email communications about your project inquiry."
                    </p>
                </form>
            </Show>
        </div>
    }
}
