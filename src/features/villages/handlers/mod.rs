pub mod village_handler;

pub use village_handler::{
    __path_create_village, __path_delete_village, __path_get_village,
    __path_get_village_by_slug, __path_list_villages, __path_update_village, create_village,
    delete_village, get_village, get_village_by_slug, list_villages, update_village,
};
