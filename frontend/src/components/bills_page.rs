use shared::{Bill, Route, User};
use yew::prelude::*;

use super::actions::Actions;
use super::receipt_modal::ReceiptModalView;
use super::status_pages::{ErrorPage, LoadingPage};
use super::vertical_layout::VerticalLayout;
use crate::containers::ReceiptModal;
use crate::hooks::use_bills;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct BillsPageProps {
    pub api_client: ApiClient,
    pub session: User,
    /// `Bills` for an employee's own list, `Dashboard` for the admin view
    pub route: Route,
    pub on_navigate: Callback<Route>,
}

/// Title shown above the bills table
pub fn page_title(route: Route) -> &'static str {
    match route {
        Route::Dashboard => "Notes de frais des employés",
        _ => "Mes notes de frais",
    }
}

/// Only employees file new bills
fn shows_new_bill_button(route: Route) -> bool {
    route != Route::Dashboard
}

#[derive(Properties, PartialEq)]
struct BillRowProps {
    bill: Bill,
    show_employee: bool,
    on_view_receipt: Callback<String>,
}

#[function_component(BillRow)]
fn bill_row(props: &BillRowProps) -> Html {
    let bill = &props.bill;
    html! {
        <tr>
            <td>{&bill.expense_type}</td>
            <td>{&bill.name}</td>
            <td>{&bill.date}</td>
            <td>{format!("{} €", bill.amount)}</td>
            <td>{bill.status.label()}</td>
            {if props.show_employee { html! { <td>{&bill.email}</td> } } else { html! {} }}
            <td>
                <Actions bill_url={bill.file_url.clone()} on_view_receipt={props.on_view_receipt.clone()} />
            </td>
        </tr>
    }
}

#[derive(Properties, PartialEq)]
pub struct BillsViewProps {
    pub route: Route,
    /// Rows in display order
    pub bills: Vec<Bill>,
    pub modal: Option<ReceiptModal>,
    pub on_new_bill: Callback<()>,
    pub on_view_receipt: Callback<String>,
    pub on_close_receipt: Callback<()>,
    #[prop_or_default]
    pub on_navigate: Option<Callback<Route>>,
}

/// Bills table with its receipt modal
#[function_component(BillsView)]
pub fn bills_view(props: &BillsViewProps) -> Html {
    let show_employee = props.route == Route::Dashboard;

    let new_bill_button = if shows_new_bill_button(props.route) {
        let on_new_bill = props.on_new_bill.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_new_bill.emit(()));
        html! {
            <button type="button" data-testid="btn-new-bill" class="btn btn-primary" {onclick}>
                {"Nouvelle note de frais"}
            </button>
        }
    } else {
        html! {}
    };

    html! {
        <div class="layout">
            <VerticalLayout height={120} active={props.route} on_navigate={props.on_navigate.clone()} />
            <div class="content">
                <div class="content-header">
                    <div class="content-title">{page_title(props.route)}</div>
                    {new_bill_button}
                </div>
                <div id="data-table">
                    <table class="table table-striped">
                        <thead>
                            <tr>
                                <th>{"Type"}</th>
                                <th>{"Nom"}</th>
                                <th>{"Date"}</th>
                                <th>{"Montant"}</th>
                                <th>{"Statut"}</th>
                                {if show_employee { html! { <th>{"Employé"}</th> } } else { html! {} }}
                                <th>{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody data-testid="tbody">
                            {for props.bills.iter().map(|bill| html! {
                                <BillRow
                                    key={bill.id.clone().unwrap_or_else(|| bill.name.clone())}
                                    bill={bill.clone()}
                                    {show_employee}
                                    on_view_receipt={props.on_view_receipt.clone()}
                                />
                            })}
                        </tbody>
                    </table>
                </div>
            </div>
            <ReceiptModalView modal={props.modal.clone()} on_close={props.on_close_receipt.clone()} />
        </div>
    }
}

#[function_component(BillsPage)]
pub fn bills_page(props: &BillsPageProps) -> Html {
    let bills = use_bills(&props.api_client, &props.session, &props.on_navigate);

    if bills.state.loading {
        return html! { <LoadingPage active={props.route} /> };
    }
    if let Some(error) = &bills.state.error {
        return html! { <ErrorPage error={error.clone()} active={props.route} /> };
    }

    // Rows keep the order of the hook state, already most recent first
    html! {
        <BillsView
            route={props.route}
            bills={bills.state.bills.clone()}
            modal={bills.state.modal.clone()}
            on_new_bill={bills.actions.new_bill.clone()}
            on_view_receipt={bills.actions.open_receipt.clone()}
            on_close_receipt={bills.actions.close_receipt.clone()}
            on_navigate={props.on_navigate.clone()}
        />
    }
}
