use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::loose::{first_present, first_truthy, to_number, to_text};

/// Body of `GET /api/pedidos`. The status metadata is kept loose so a stray
/// value in it cannot fail the whole list.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub pedidos: Option<Vec<RawOrder>>,
    #[serde(default)]
    pub statuses: Option<Value>,
    #[serde(default)]
    pub active_status: Option<Value>,
}

impl OrdersResponse {
    pub fn orders(&self) -> Vec<Order> {
        self.pedidos
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(Order::from_raw)
            .collect()
    }

    /// Status labels in upstream order; nulls are skipped, other scalars are
    /// taken as text.
    pub fn statuses(&self) -> Vec<String> {
        match &self.statuses {
            Some(Value::Array(list)) => list
                .iter()
                .filter(|v| !v.is_null())
                .map(to_text)
                .collect(),
            _ => vec![],
        }
    }

    pub fn active_status(&self) -> Option<String> {
        first_truthy(&[&self.active_status]).map(to_text)
    }
}

/// An order exactly as the upstream sends it. Every field is optional because
/// the upstream has renamed fields more than once.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawOrder {
    #[serde(default)]
    pub numero: Option<Value>,

    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<Value>,
    #[serde(default, rename = "dataEmissao")]
    pub data_emissao: Option<Value>,
    #[serde(default)]
    pub data_pedido: Option<Value>,
    #[serde(default, rename = "updatedAt")]
    pub updated_at: Option<Value>,

    #[serde(default)]
    pub cliente_nome: Option<Value>,
    #[serde(default)]
    pub cliente: Option<Value>,
    #[serde(default)]
    pub contato: Option<Value>,

    #[serde(default)]
    pub vendedor_nome: Option<Value>,
    #[serde(default)]
    pub vendedor: Option<Value>,

    #[serde(default)]
    pub status_nome: Option<Value>,
    #[serde(default)]
    pub status: Option<Value>,

    #[serde(default)]
    pub total: Option<Value>,

    #[serde(default)]
    pub itens: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub sku: Option<Value>,
    #[serde(default)]
    pub codigo: Option<Value>,

    #[serde(default)]
    pub nome: Option<Value>,
    #[serde(default)]
    pub descricao: Option<Value>,
    #[serde(default)]
    pub titulo: Option<Value>,

    #[serde(default)]
    pub quantidade: Option<Value>,
    #[serde(default)]
    pub qtde: Option<Value>,

    #[serde(default)]
    pub preco: Option<Value>,
    #[serde(default)]
    pub valor: Option<Value>,
    #[serde(default)]
    pub vlr: Option<Value>,
}

pub const NO_CUSTOMER: &str = "—";
pub const NO_SELLER: &str = "Sem nome";
pub const NO_STATUS: &str = "—";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    /// Empty when the upstream omitted `numero`.
    pub number: String,
    pub date: Option<String>,
    pub customer: String,
    pub seller: String,
    pub status: String,
    pub total: f64,
    /// Modification marker used for change detection.
    pub revision: String,
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub sku: String,
    pub name: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.quantity * self.unit_price
    }

    /// `position` is zero-based; only used to name items that have no name.
    pub fn from_raw(raw: &RawLineItem, position: usize) -> Self {
        let name = first_truthy(&[&raw.nome, &raw.descricao, &raw.titulo])
            .map(to_text)
            .unwrap_or_else(|| format!("Item {}", position + 1));

        let quantity = first_present(&[&raw.quantidade, &raw.qtde])
            .map(to_number)
            .unwrap_or(1.0);

        let unit_price = first_present(&[&raw.preco, &raw.valor, &raw.vlr])
            .map(to_number)
            .unwrap_or(0.0);

        let sku = first_truthy(&[&raw.sku, &raw.codigo])
            .map(to_text)
            .unwrap_or_default();

        LineItem {
            sku,
            name,
            quantity,
            unit_price,
        }
    }
}

impl Order {
    pub fn from_raw(raw: &RawOrder) -> Self {
        let number = first_present(&[&raw.numero]).map(to_text).unwrap_or_default();

        let date = first_truthy(&[&raw.data, &raw.created_at, &raw.data_emissao, &raw.data_pedido])
            .map(to_text);

        let customer = first_truthy(&[&raw.cliente_nome, &raw.cliente, &raw.contato])
            .map(to_text)
            .unwrap_or_else(|| NO_CUSTOMER.to_string());

        let seller = first_truthy(&[&raw.vendedor_nome, &raw.vendedor])
            .map(to_text)
            .unwrap_or_else(|| NO_SELLER.to_string());

        let status = first_truthy(&[&raw.status_nome, &raw.status])
            .map(to_text)
            .unwrap_or_else(|| NO_STATUS.to_string());

        let total = first_present(&[&raw.total]).map(to_number).unwrap_or(0.0);

        let revision = first_truthy(&[&raw.updated_at, &raw.data])
            .map(to_text)
            .unwrap_or_default();

        // Entries that are not objects still count as (nameless) items.
        let items = match &raw.itens {
            Some(Value::Array(list)) => list
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let item: RawLineItem = serde_json::from_value(v.clone()).unwrap_or_default();
                    LineItem::from_raw(&item, i)
                })
                .collect(),
            _ => vec![],
        };

        Order {
            number,
            date,
            customer,
            seller,
            status,
            total,
            revision,
            items,
        }
    }
}
