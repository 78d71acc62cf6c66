//! Mission statement page.

use leptos::prelude::*;

#[component]
pub fn AboutPage() -> impl IntoView {
    view! {
        <div class="content-page">
            <h1>"About Us"</h1>
            <p>
                "Our mission is to make fitness and wellness accessible to everyone, regardless of mobility or ability. "
                "This platform is built to empower, inspire, and support people in their journey towards a healthier lifestyle."
            </p>
        </div>
    }
}
