use crate::app_state_mut::AppStateMut;
use crate::Screen;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ActionLinkProps {
    /// Screen to open on click.
    pub to: Screen,

    #[props(default)]
    pub title: Option<String>,

    pub children: Element,
}

/// An in-app link. Navigates through [`AppStateMut`] rather than the URL.
#[component]
pub fn ActionLink(props: ActionLinkProps) -> Element {
    let mut app_state_mut = use_context::<AppStateMut>();

    rsx! {
        a {
            href: "#",
            title: props.title.clone(),
            onclick: move |evt: MouseEvent| {
                evt.prevent_default();
                app_state_mut.navigate(props.to.clone());
            },
            {props.children}
        }
    }
}
