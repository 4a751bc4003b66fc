// Table and column names match existing `facturacion.db` files.

diesel::table! {
    supplier (id) {
        id -> Integer,
        name -> Text,
        cuit -> Text,
    }
}

diesel::table! {
    bill (id) {
        id -> Integer,
        invoice_number -> Text,
        invoice_date -> Date,
        classification -> Text,
        description -> Text,
        supplier_id -> Integer,
    }
}

diesel::joinable!(bill -> supplier (supplier_id));

diesel::allow_tables_to_appear_in_same_query!(supplier, bill);
