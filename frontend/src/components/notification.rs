//! 通知提示框
//!
//! 每个页面持有一个 `RwSignal<Option<Notice>>`，写入后自动在设定时间后隐藏。

use std::time::Duration;

use bookstore_shared::{Notice, Severity};
use leptos::prelude::*;

/// 提示的代次，每写入一次提示就前进一代
///
/// 定时器只认自己那一代；同一条提示连续出现两次时，前一个定时器不会提前关掉后一次。
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct NoticeGeneration(u64);

impl NoticeGeneration {
    fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }

    fn still_showing(self, ticket: Self) -> bool {
        self == ticket
    }
}

/// 创建通知信号，非空时在 `hide_after_ms` 后自动清除
pub fn use_notice(hide_after_ms: u64) -> RwSignal<Option<Notice>> {
    let notice = RwSignal::new(Option::<Notice>::None);
    let generation = StoredValue::new(NoticeGeneration::default());

    Effect::new(move |_| {
        if notice.with(Option::is_none) {
            return;
        }
        let ticket = generation.get_value().next();
        generation.set_value(ticket);
        set_timeout(
            move || {
                if generation.get_value().still_showing(ticket) {
                    notice.set(None);
                }
            },
            Duration::from_millis(hide_after_ms),
        );
    });

    notice
}

fn alert_class(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "alert alert-success shadow-lg",
        Severity::Info => "alert alert-info shadow-lg",
        Severity::Warning => "alert alert-warning shadow-lg",
        Severity::Error => "alert alert-error shadow-lg",
    }
}

#[component]
pub fn Notification(notice: RwSignal<Option<Notice>>) -> impl IntoView {
    move || {
        notice.get().map(|n| {
            view! {
                <div class="toast toast-bottom toast-end z-50">
                    <div role="alert" class=alert_class(n.severity)>
                        <span>{n.message}</span>
                        <button
                            class="btn btn-ghost btn-xs"
                            aria-label="close"
                            on:click=move |_| notice.set(None)
                        >
                            "✕"
                        </button>
                    </div>
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_notice_outlives_the_first_timer() {
        let first = NoticeGeneration::default().next();
        // 同样的提示再次写入，前进到下一代
        let second = first.next();

        assert!(!second.still_showing(first));
        assert!(second.still_showing(second));
    }

    #[test]
    fn generation_wraps_instead_of_overflowing() {
        let last = NoticeGeneration(u64::MAX);
        assert_eq!(last.next(), NoticeGeneration(0));
    }
}
