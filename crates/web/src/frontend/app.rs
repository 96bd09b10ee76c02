//! Leptos product management page.

use leptos::*;

use stockdesk_catalog::{
    CatalogError, DeletePolicy, Entity, FormField, InventoryWidget, PAGE_SIZE_OPTIONS, Product,
    Prompt, SortKey, WidgetConfig,
};

use crate::dialogs::BrowserPrompt;
use crate::storage::LocalStorageStore;

type Widget = InventoryWidget<LocalStorageStore>;

fn open_widget() -> Result<Widget, CatalogError> {
    let backend = LocalStorageStore::new()?;
    let config = WidgetConfig::default().with_delete_policy(DeletePolicy::Confirm);
    InventoryWidget::open(backend, &config, BrowserPrompt)
}

/// Surface a failed operation. Validation failures were already alerted by the
/// widget itself.
fn report(err: CatalogError) {
    if err.is_validation() {
        return;
    }
    tracing::error!(error = %err, "catalog operation failed");
    BrowserPrompt.alert(&format!("Something went wrong: {err}"));
}

/// Main application component.
#[component]
pub fn App() -> impl IntoView {
    match open_widget() {
        Ok(widget) => {
            let widget = create_rw_signal(widget);
            view! { <InventoryPage widget=widget/> }.into_view()
        }
        Err(err) => view! {
            <div class="p-6">
                <p class="error">{format!("Could not open the product catalog: {err}")}</p>
            </div>
        }
        .into_view(),
    }
}

#[component]
fn InventoryPage(widget: RwSignal<Widget>) -> impl IntoView {
    let can_bulk_delete = create_memo(move |_| widget.with(|w| w.can_bulk_delete()));
    let form_title = create_memo(move |_| widget.with(|w| w.form().map(|f| f.title())));

    view! {
        <div class="p-6">
            <h1 class="text-2xl font-bold mb-4">"Product Management App"</h1>
            <button
                class="bg-green-500 text-white px-4 py-2 mb-4"
                on:click=move |_| widget.update(|w| w.open_add())
            >
                "Add Product"
            </button>
            <Show when=move || can_bulk_delete.get()>
                <button
                    class="bg-red-500 text-white px-4 py-2 mb-4 ml-4"
                    on:click=move |_| {
                        widget.update(|w| {
                            if let Err(err) = w.bulk_delete() {
                                report(err);
                            }
                        })
                    }
                >
                    "Delete Selected"
                </button>
            </Show>

            <Toolbar widget=widget/>
            <ProductTable widget=widget/>
            <Pagination widget=widget/>

            <Show when=move || form_title.get().is_some()>
                <ProductFormModal widget=widget title=form_title/>
            </Show>
        </div>
    }
}

/// Search box and page-size selector.
#[component]
fn Toolbar(widget: RwSignal<Widget>) -> impl IntoView {
    view! {
        <div class="mb-4">
            <input
                type="search"
                placeholder="Search products"
                class="border px-2 py-1 mr-4"
                prop:value=move || widget.with(|w| w.params().search.clone())
                on:input=move |ev| {
                    let query = event_target_value(&ev);
                    widget.update(move |w| w.set_search(query));
                }
            />
            <label for="pageSize" class="mr-2">"Products per page:"</label>
            <select
                id="pageSize"
                class="border px-2 py-1"
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<usize>() {
                        Ok(size) => widget.update(|w| {
                            if let Err(err) = w.set_page_size(size) {
                                report(err.into());
                            }
                        }),
                        Err(err) => tracing::warn!(error = %err, "ignoring page size selection"),
                    }
                }
            >
                {PAGE_SIZE_OPTIONS
                    .into_iter()
                    .map(|size| {
                        view! {
                            <option
                                value=size.to_string()
                                selected=move || widget.with(|w| w.params().page_size.get() == size)
                            >
                                {size}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
fn ProductTable(widget: RwSignal<Widget>) -> impl IntoView {
    move || {
        let (rows, empty) = widget.with(|w| {
            let page = w.view();
            let rows: Vec<Product> = page.rows.iter().map(|p| (*p).clone()).collect();
            (rows, page.is_empty())
        });

        if empty {
            return view! { <p class="text-gray-500">"No products available."</p> }.into_view();
        }

        view! {
            <div class="overflow-x-auto">
                <table class="min-w-full">
                    <thead>
                        <tr class="text-left">
                            <th class="text-center">
                                <input
                                    type="checkbox"
                                    prop:checked=move || widget.with(|w| w.all_visible_selected())
                                    on:change=move |_| widget.update(|w| w.toggle_select_all())
                                />
                            </th>
                            {SortKey::ALL
                                .into_iter()
                                .map(|key| {
                                    view! {
                                        <th
                                            class="border-b px-4 py-2 font-medium cursor-pointer"
                                            on:click=move |_| widget.update(|w| {
                                                w.sort_by(key);
                                            })
                                        >
                                            {key.label()}
                                            " "
                                            {move || widget.with(|w| w.sort_indicator(key).symbol())}
                                        </th>
                                    }
                                })
                                .collect_view()}
                            <th class="border-b px-4 py-2 font-medium">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows
                            .into_iter()
                            .map(|product| view! { <ProductRow widget=widget product=product/> })
                            .collect_view()}
                    </tbody>
                </table>
            </div>
        }
        .into_view()
    }
}

#[component]
fn ProductRow(widget: RwSignal<Widget>, product: Product) -> impl IntoView {
    let id = product.id();

    view! {
        <tr>
            <td class="text-center">
                <input
                    type="checkbox"
                    prop:checked=move || widget.with(|w| w.is_selected(id))
                    on:change=move |_| widget.update(|w| {
                        w.toggle_select(id);
                    })
                />
            </td>
            <td class="border-b px-4 py-2">{product.name().to_string()}</td>
            <td class="border-b px-4 py-2">{product.price().to_string()}</td>
            <td class="border-b px-4 py-2">{product.category().unwrap_or_default().to_string()}</td>
            <td class="border-b px-4 py-2">
                <button
                    class="bg-yellow-500 text-white px-3 py-1 rounded-sm mr-2"
                    on:click=move |_| widget.update(|w| {
                        if let Err(err) = w.open_edit(id) {
                            report(err.into());
                        }
                    })
                >
                    "Edit"
                </button>
                <button
                    class="bg-red-500 text-white px-3 py-1 rounded-sm"
                    on:click=move |_| widget.update(|w| {
                        if let Err(err) = w.delete(id) {
                            report(err);
                        }
                    })
                >
                    "Delete"
                </button>
            </td>
        </tr>
    }
}

#[component]
fn Pagination(widget: RwSignal<Widget>) -> impl IntoView {
    view! {
        <div class="mt-4">
            {move || {
                let (pages, current) = widget.with(|w| {
                    let page = w.view();
                    (page.page_numbers(), page.current_page)
                });
                pages
                    .map(|n| {
                        let class = if n == current {
                            "px-3 py-1 border bg-blue-500 text-white"
                        } else {
                            "px-3 py-1 border"
                        };
                        view! {
                            <button
                                class=class
                                on:click=move |_| widget.update(|w| {
                                    if let Err(err) = w.go_to_page(n) {
                                        report(err.into());
                                    }
                                })
                            >
                                {n}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}

/// Add/edit modal. Every keystroke is written straight into the widget's
/// form session; nothing is parsed until Save.
#[component]
fn ProductFormModal(widget: RwSignal<Widget>, title: Memo<Option<&'static str>>) -> impl IntoView {
    let field_value = move |field: FormField| {
        widget.with(|w| w.form().map(|f| f.get(field).to_string()).unwrap_or_default())
    };
    let set_field = move |field: FormField, event: ev::Event| {
        let value = event_target_value(&event);
        widget.update(move |w| {
            if let Some(form) = w.form_mut() {
                form.set(field, value);
            }
        });
    };

    view! {
        <div class="p-4 mx-auto mt-20 bg-white shadow-md max-w-md">
            <h2 class="text-lg font-bold mb-4">{move || title.get().unwrap_or_default()}</h2>
            <form on:submit=move |ev| {
                ev.prevent_default();
                widget.update(|w| {
                    if let Err(err) = w.submit_form() {
                        report(err);
                    }
                });
            }>
                <input
                    name="name"
                    placeholder="Product Name"
                    class="w-full mb-2 p-2 border"
                    prop:value=move || field_value(FormField::Name)
                    on:input=move |ev| set_field(FormField::Name, ev)
                />
                <input
                    name="price"
                    type="number"
                    step="any"
                    placeholder="Price"
                    class="w-full mb-2 p-2 border"
                    prop:value=move || field_value(FormField::Price)
                    on:input=move |ev| set_field(FormField::Price, ev)
                />
                <input
                    name="category"
                    placeholder="Category"
                    class="w-full mb-4 p-2 border"
                    prop:value=move || field_value(FormField::Category)
                    on:input=move |ev| set_field(FormField::Category, ev)
                />
                <button type="submit" class="bg-blue-500 text-white px-4 py-2">
                    "Save"
                </button>
                <button
                    type="button"
                    class="bg-gray-300 text-black px-4 py-2 ml-2"
                    on:click=move |_| widget.update(|w| w.close_form())
                >
                    "Cancel"
                </button>
            </form>
        </div>
    }
}
