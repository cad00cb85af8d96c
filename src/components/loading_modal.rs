use crate::components::Spinner;
use leptos::{html::Dialog, prelude::*};

#[component]
pub fn LoadingModal(when: Memo<bool>, #[prop(into)] message: Signal<String>) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();

    Effect::new(move |_| match dialog_ref.get() {
        Some(dialog) => match when.get() {
            true => {
                let _ = dialog.show_modal();
            }
            false => dialog.close(),
        },
        None => (),
    });

    view! {
        <dialog node_ref=dialog_ref>
            // prevent focus ring from showing around the main div
            <div tabindex="0"></div>
            <div class="align-middle inline-flex items-center justify-center gap-3">
                <Spinner size="h-8 w-8" />
                <div class="font-bold">{message}</div>
            </div>
        </dialog>
    }
}
